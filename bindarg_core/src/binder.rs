use thiserror::Error;
#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::convert::ConversionError;
use crate::model::Arity;
use crate::schema::{CommandSchema, OptionSchema};
use crate::tokens::CommandInput;

mod environment;

pub use environment::EnvironmentVariables;

/// Error when the input cannot be bound onto the resolved command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// Required options were given no value, neither on the Cli nor through the environment.
    #[error("missing required option(s): {}.", .0.join(", "))]
    MissingOptions(Vec<String>),

    /// Required parameters were given no value.
    #[error("missing required parameter(s): {}.", .0.join(", "))]
    MissingParameters(Vec<String>),

    /// Positional tokens were left over once every parameter was bound.
    #[error("unexpected parameter(s): {}.", .0.join(" "))]
    UnexpectedParameters(Vec<String>),

    /// Option identifiers which the command does not declare.
    #[error("unrecognized option(s): {}.", .0.join(", "))]
    UnrecognizedOptions(Vec<String>),

    /// The command match was resolved by a different application; carries the command's type name.
    #[error("command '{0}' was not resolved by this application.")]
    ForeignMatch(String),

    /// A scalar input was given more than one value.
    #[error("'{input}' takes a single value, but {provided} were provided.")]
    Arity {
        /// The input (parameter name, or option identifier).
        input: String,
        /// The number of values provided.
        provided: usize,
    },

    /// A value did not convert.
    #[error("invalid value for '{input}': {error}")]
    Conversion {
        /// The input (parameter name, or option identifier).
        input: String,
        /// The conversion failure.
        #[source]
        error: ConversionError,
    },

    /// The converted value failed validation.
    #[error("invalid value for '{input}': {}.", .failures.join("; "))]
    Validation {
        /// The input (parameter name, or option identifier).
        input: String,
        /// Every failure, in validator order.
        failures: Vec<String>,
    },
}

/// The reasons a single input cannot bind its values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[doc(hidden)]
pub enum InvalidBinding {
    Arity { provided: usize },
    Conversion(ConversionError),
    Validation(Vec<String>),
}

impl InvalidBinding {
    fn on(self, input: String) -> BindingError {
        match self {
            InvalidBinding::Arity { provided } => BindingError::Arity { input, provided },
            InvalidBinding::Conversion(error) => BindingError::Conversion { input, error },
            InvalidBinding::Validation(failures) => BindingError::Validation { input, failures },
        }
    }
}

/// The target of a binding: assigns raw values to the inputs of one command instance.
/// Indices refer to the positions in the command schema's parameters and options.
pub(crate) trait Assign {
    fn parameter(&mut self, index: usize, values: &[String]) -> Result<(), InvalidBinding>;

    fn option(&mut self, index: usize, values: &[String]) -> Result<(), InvalidBinding>;
}

/// Bind the input onto the target.
///
/// The input is checked structurally first (unrecognized options, missing options, missing parameters, left over parameters), and only then converted.
/// Options bind before parameters.
pub(crate) fn bind(
    command: &CommandSchema,
    input: &CommandInput,
    parameters: &[String],
    environment: &EnvironmentVariables,
    target: &mut impl Assign,
) -> Result<(), BindingError> {
    let unrecognized: Vec<String> = input
        .options()
        .iter()
        .filter(|option| command.find_option(option.identifier()).is_none())
        .map(|option| option.identifier().to_string())
        .collect();

    if !unrecognized.is_empty() {
        return Err(BindingError::UnrecognizedOptions(unrecognized));
    }

    let options = gather_options(command, input, environment)?;
    let parameters = distribute_parameters(command, parameters)?;

    for (index, values) in options {
        let identifier = command.options()[index].identifier();
        target
            .option(index, &values)
            .map_err(|error| error.on(identifier.to_string()))?;
    }

    for (index, values) in parameters {
        let name = command.parameters()[index].name();
        target
            .parameter(index, values)
            .map_err(|error| error.on(name.to_string()))?;
    }

    Ok(())
}

/// The raw values of every option with a value source, keyed by option index.
fn gather_options(
    command: &CommandSchema,
    input: &CommandInput,
    environment: &EnvironmentVariables,
) -> Result<Vec<(usize, Vec<String>)>, BindingError> {
    let mut gathered = Vec::default();
    let mut missing = Vec::default();

    for (index, option) in command.options().iter().enumerate() {
        if option.implicit().is_some() {
            continue;
        }

        match option_values(option, input, environment) {
            Some(values) if !(values.is_empty() && option.is_required()) => {
                gathered.push((index, values));
            }
            _ => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Option '{}' is unset.", option.identifier());
                }

                if option.is_required() {
                    missing.push(option.identifier().to_string());
                }
            }
        }
    }

    if missing.is_empty() {
        Ok(gathered)
    } else {
        Err(BindingError::MissingOptions(missing))
    }
}

/// The raw values of the option: every Cli occurrence concatenated, otherwise its environment variable.
fn option_values(
    option: &OptionSchema,
    input: &CommandInput,
    environment: &EnvironmentVariables,
) -> Option<Vec<String>> {
    let occurrences: Vec<&[String]> = input
        .options()
        .iter()
        .filter(|occurrence| option.matches(occurrence.identifier()))
        .map(|occurrence| occurrence.values())
        .collect();

    if !occurrences.is_empty() {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Option '{}' is bound from the Cli.", option.identifier());
        }

        return Some(occurrences.concat());
    }

    let value = environment.get(option.environment_variable()?)?;

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Option '{}' is bound from the environment variable '{}'.",
            option.identifier(),
            option.environment_variable().unwrap_or_default()
        );
    }

    match option.arity() {
        Arity::Scalar => Some(vec![value.to_string()]),
        Arity::Sequence => Some(environment::split_list(value)),
    }
}

/// Distribute the parameter tokens in parameter order: a scalar takes one token, the sequence takes the rest.
fn distribute_parameters<'t>(
    command: &CommandSchema,
    tokens: &'t [String],
) -> Result<Vec<(usize, &'t [String])>, BindingError> {
    let mut remaining = tokens;
    let mut distributed = Vec::default();
    let mut missing = Vec::default();

    for (index, parameter) in command.parameters().iter().enumerate() {
        let take = match parameter.arity() {
            Arity::Scalar => remaining.len().min(1),
            Arity::Sequence => remaining.len(),
        };
        let (values, rest) = remaining.split_at(take);
        remaining = rest;

        if values.is_empty() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Parameter '{}' is unset.", parameter.name());
            }

            if parameter.is_required() {
                missing.push(parameter.name().to_string());
            }
        } else {
            distributed.push((index, values));
        }
    }

    if !missing.is_empty() {
        Err(BindingError::MissingParameters(missing))
    } else if !remaining.is_empty() {
        Err(BindingError::UnexpectedParameters(remaining.to_vec()))
    } else {
        Ok(distributed)
    }
}
