use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Arity;
use crate::schema::{CommandSchema, OptionSchema, ParameterSchema, SchemaError};

/// Check the application-wide invariants, and then every command.
pub(crate) fn check_application(commands: &[CommandSchema]) -> Result<(), SchemaError> {
    if commands.is_empty() {
        return Err(SchemaError::NoCommands);
    }

    let mut default: Option<&CommandSchema> = None;
    let mut names: HashMap<String, &CommandSchema> = HashMap::default();

    for command in commands {
        check_command(command)?;

        match &command.name {
            None => {
                if let Some(first) = default {
                    return Err(SchemaError::DuplicateDefaultCommand {
                        first: first.type_name,
                        second: command.type_name,
                    });
                }

                default.replace(command);
            }
            Some(name) => {
                if let Some(first) = names.insert(name.to_lowercase(), command) {
                    return Err(SchemaError::DuplicateCommandName {
                        name: name.clone(),
                        first: first.type_name,
                        second: command.type_name,
                    });
                }
            }
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Application schema with {} commands is valid.",
            commands.len()
        );
    }

    Ok(())
}

/// Check the invariants of one command.
/// The parameters must already be sorted by order, and the implicit options appended.
pub(crate) fn check_command(command: &CommandSchema) -> Result<(), SchemaError> {
    if let Some(name) = &command.name {
        check_command_name(command.type_name, name)?;
    }

    check_parameters(command.type_name, &command.parameters)?;
    check_options(command.type_name, &command.options)
}

fn check_command_name(type_name: &'static str, name: &str) -> Result<(), SchemaError> {
    let invalid = |reason| SchemaError::InvalidCommandName {
        type_name,
        name: name.to_string(),
        reason,
    };

    for segment in name.split(' ') {
        if segment.is_empty() {
            return Err(invalid("empty segment"));
        } else if segment.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace within a segment"));
        } else if segment.starts_with('-') {
            return Err(invalid("segment starts with '-'"));
        } else if segment.starts_with('[') {
            return Err(invalid("segment starts with '['"));
        }
    }

    Ok(())
}

fn check_parameters(
    command: &'static str,
    parameters: &[ParameterSchema],
) -> Result<(), SchemaError> {
    let mut orders: HashMap<i32, &ParameterSchema> = HashMap::default();
    let mut names: HashMap<String, &ParameterSchema> = HashMap::default();

    for parameter in parameters {
        if orders.insert(parameter.order, parameter).is_some() {
            return Err(SchemaError::DuplicateParameterOrder {
                command,
                order: parameter.order,
            });
        }

        if names.insert(parameter.name.to_lowercase(), parameter).is_some() {
            return Err(SchemaError::DuplicateParameterName {
                command,
                name: parameter.name.clone(),
            });
        }
    }

    let sequences: Vec<&ParameterSchema> = parameters
        .iter()
        .filter(|parameter| parameter.arity == Arity::Sequence)
        .collect();

    match sequences.as_slice() {
        [] => {}
        [sequence] => {
            if parameters.iter().any(|other| other.order > sequence.order) {
                return Err(SchemaError::NonLastSequenceParameter {
                    command,
                    name: sequence.name.clone(),
                });
            }
        }
        _ => {
            return Err(SchemaError::MultipleSequenceParameters {
                command,
                names: sequences.iter().map(|p| p.name.clone()).collect(),
            });
        }
    }

    let mut optional: Option<&ParameterSchema> = None;

    for parameter in parameters {
        match optional {
            Some(previous) if parameter.required => {
                return Err(SchemaError::RequiredAfterOptional {
                    command,
                    name: parameter.name.clone(),
                    optional: previous.name.clone(),
                });
            }
            None if !parameter.required => {
                optional.replace(parameter);
            }
            _ => {}
        }
    }

    Ok(())
}

fn check_options(command: &'static str, options: &[OptionSchema]) -> Result<(), SchemaError> {
    let mut names: HashMap<String, &OptionSchema> = HashMap::default();
    let mut shorts: HashMap<char, &OptionSchema> = HashMap::default();
    let mut variables: HashMap<&str, &OptionSchema> = HashMap::default();

    for option in options {
        if option.name.is_none() && option.short.is_none() {
            return Err(SchemaError::UnnamedOption { command });
        }

        if let Some(name) = &option.name {
            check_option_name(command, name)?;

            if names.insert(name.to_lowercase(), option).is_some() {
                return Err(SchemaError::DuplicateOptionName {
                    command,
                    name: name.clone(),
                });
            }
        }

        if let Some(short) = option.short {
            if short.is_whitespace() || short == '-' {
                return Err(SchemaError::InvalidShortName { command, short });
            }

            if shorts.insert(short, option).is_some() {
                return Err(SchemaError::DuplicateShortName { command, short });
            }
        }

        if let Some(variable) = &option.environment_variable {
            if variables.insert(variable.as_str(), option).is_some() {
                return Err(SchemaError::DuplicateEnvironmentVariable {
                    command,
                    variable: variable.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_option_name(command: &'static str, name: &str) -> Result<(), SchemaError> {
    let invalid = |reason| SchemaError::InvalidOptionName {
        command,
        name: name.to_string(),
        reason,
    };

    if name.chars().count() < 2 {
        Err(invalid("must be at least two characters"))
    } else if name.chars().any(char::is_whitespace) {
        Err(invalid("contains whitespace"))
    } else if name.starts_with('-') {
        Err(invalid("starts with '-'"))
    } else {
        Ok(())
    }
}

/// Sort the declared parameters by ascending order, carrying each one's companion along with it.
pub(crate) fn sort_by_order<B>(
    declared: Vec<(ParameterSchema, B)>,
) -> (Vec<ParameterSchema>, Vec<B>) {
    let mut declared = declared;
    declared.sort_by_key(|(parameter, _)| parameter.order);
    declared.into_iter().unzip()
}
