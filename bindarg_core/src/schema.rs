use crate::constant::*;
use crate::model::{eq_ignore_case, Arity, ValueKind};
use crate::resolver::CommandIndex;
use crate::tokens::Identifier;

mod build;
mod error;

pub(crate) use build::*;
pub use error::SchemaError;

/// The schema-only options every command carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplicitOption {
    /// `--help`/`-h`, on every command.
    Help,
    /// `--version`, on the default command only.
    Version,
}

/// The schema of a positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    pub(crate) order: i32,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) arity: Arity,
    pub(crate) kind: ValueKind,
    pub(crate) required: bool,
}

impl ParameterSchema {
    /// The position of this parameter relative to the others.
    pub fn order(&self) -> i32 {
        self.order
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether this parameter takes one token or all remaining tokens.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The kind of value this parameter converts into.
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Whether a token must be provided.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// The schema of a named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSchema {
    pub(crate) name: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) environment_variable: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) arity: Arity,
    pub(crate) kind: ValueKind,
    pub(crate) required: bool,
    pub(crate) implicit: Option<ImplicitOption>,
}

impl OptionSchema {
    pub(crate) fn help() -> Self {
        Self {
            name: Some(HELP_NAME.to_string()),
            short: Some(HELP_SHORT),
            environment_variable: None,
            description: Some("Shows help text.".to_string()),
            arity: Arity::Scalar,
            kind: ValueKind::Boolean,
            required: false,
            implicit: Some(ImplicitOption::Help),
        }
    }

    pub(crate) fn version() -> Self {
        Self {
            name: Some(VERSION_NAME.to_string()),
            short: None,
            environment_variable: None,
            description: Some("Shows version information.".to_string()),
            arity: Arity::Scalar,
            kind: ValueKind::Boolean,
            required: false,
            implicit: Some(ImplicitOption::Version),
        }
    }

    /// The long name (`--name`).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The short name (`-n`).
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The environment variable consulted when the option is absent from the Cli.
    pub fn environment_variable(&self) -> Option<&str> {
        self.environment_variable.as_deref()
    }

    /// The help description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether this option binds one value or many.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The kind of value this option converts into.
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Whether a value must be provided (on the Cli or through the environment).
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Which implicit option this is, if it has no backing binding.
    pub fn implicit(&self) -> Option<ImplicitOption> {
        self.implicit
    }

    /// Whether the Cli identifier refers to this option.
    /// Long names match ignoring case; short names match exactly.
    pub fn matches(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::Long(name) => self
                .name
                .as_ref()
                .map_or(false, |own| eq_ignore_case(own, name)),
            Identifier::Short(short) => self.short == Some(*short),
        }
    }

    /// The identifier used to refer to this option in messages (`--name`, or `-n` when there is no long name).
    pub fn identifier(&self) -> Identifier {
        match (&self.name, self.short) {
            (Some(name), _) => Identifier::Long(name.clone()),
            (None, Some(short)) => Identifier::Short(short),
            (None, None) => {
                unreachable!("internal error - option schema must have a name or short name")
            }
        }
    }
}

/// The schema of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSchema {
    pub(crate) type_name: &'static str,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parameters: Vec<ParameterSchema>,
    pub(crate) options: Vec<OptionSchema>,
}

impl CommandSchema {
    /// The name of the type which declared this command.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The (space delimited) command name, or `None` for the default command.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this is the default (unnamed) command.
    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }

    /// The help description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The parameters, in ascending order.
    pub fn parameters(&self) -> &[ParameterSchema] {
        &self.parameters
    }

    /// The options, in declaration order followed by the implicit options.
    pub fn options(&self) -> &[OptionSchema] {
        &self.options
    }

    /// Find the option the Cli identifier refers to.
    pub fn find_option(&self, identifier: &Identifier) -> Option<&OptionSchema> {
        self.options.iter().find(|o| o.matches(identifier))
    }

    /// Find an implicit option.
    pub fn implicit_option(&self, implicit: ImplicitOption) -> Option<&OptionSchema> {
        self.options
            .iter()
            .find(|option| option.implicit == Some(implicit))
    }

    #[cfg(test)]
    pub(crate) fn bare(name: Option<&str>) -> Self {
        let mut options = vec![OptionSchema::help()];

        if name.is_none() {
            options.push(OptionSchema::version());
        }

        Self {
            type_name: "bare",
            name: name.map(str::to_string),
            description: None,
            parameters: Vec::default(),
            options,
        }
    }
}

/// The schema of an application: every command it declares.
///
/// Built once (see [`ApplicationBuilder`](crate::ApplicationBuilder)), immutable thereafter, and freely shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSchema {
    pub(crate) commands: Vec<CommandSchema>,
    pub(crate) index: CommandIndex,
}

impl ApplicationSchema {
    /// Every command, in declaration order.
    pub fn commands(&self) -> &[CommandSchema] {
        &self.commands
    }

    /// The default (unnamed) command, if declared.
    pub fn default_command(&self) -> Option<&CommandSchema> {
        self.commands.iter().find(|command| command.is_default())
    }

    /// Find the command with precisely this name (ignoring case).
    pub fn find(&self, name: &str) -> Option<&CommandSchema> {
        self.commands.iter().find(|command| {
            command
                .name
                .as_ref()
                .map_or(false, |own| eq_ignore_case(own, name))
        })
    }

    /// The names of every named command, in declaration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| command.name())
            .collect()
    }

    /// The commands nested directly beneath `parent` (or beneath the root, for `None`).
    ///
    /// A command is nested directly beneath another when its name extends the parent's by one or more words, and no other declared command sits between them.
    pub fn child_commands(&self, parent: Option<&str>) -> Vec<&CommandSchema> {
        let parent_words: Vec<String> = parent
            .map(|name| name.split(' ').map(str::to_lowercase).collect())
            .unwrap_or_default();
        let descendants: Vec<(&CommandSchema, Vec<String>)> = self
            .commands
            .iter()
            .filter_map(|command| {
                let words: Vec<String> = command
                    .name()?
                    .split(' ')
                    .map(str::to_lowercase)
                    .collect();

                if words.len() > parent_words.len() && words.starts_with(&parent_words) {
                    Some((command, words))
                } else {
                    None
                }
            })
            .collect();

        descendants
            .iter()
            .filter(|(_, words)| {
                !descendants.iter().any(|(_, other)| {
                    other.len() < words.len() && words.starts_with(other)
                })
            })
            .map(|(command, _)| *command)
            .collect()
    }
}
