use thiserror::Error;

/// Error when the command declarations do not form a valid application schema.
///
/// These are programming errors in the declarations, reported once by [`ApplicationBuilder::build`](crate::ApplicationBuilder::build).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The application declares no commands at all.
    #[error("the application declares no commands.")]
    NoCommands,

    /// A command name breaks the naming contract.
    #[error("command '{type_name}' has invalid name '{name}': {reason}.")]
    InvalidCommandName {
        /// The declaring type.
        type_name: &'static str,
        /// The offending name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two commands share a name (ignoring case).
    #[error("commands '{first}' and '{second}' both declare the name '{name}'.")]
    DuplicateCommandName {
        /// The name, as declared by the second command.
        name: String,
        /// The first declaring type.
        first: &'static str,
        /// The second declaring type.
        second: &'static str,
    },

    /// Two commands are unnamed.
    #[error("commands '{first}' and '{second}' are both declared as the default command.")]
    DuplicateDefaultCommand {
        /// The first declaring type.
        first: &'static str,
        /// The second declaring type.
        second: &'static str,
    },

    /// Two parameters of one command share an order.
    #[error("command '{command}' declares parameter order {order} more than once.")]
    DuplicateParameterOrder {
        /// The declaring type.
        command: &'static str,
        /// The repeated order.
        order: i32,
    },

    /// Two parameters of one command share a name (ignoring case).
    #[error("command '{command}' declares parameter '{name}' more than once.")]
    DuplicateParameterName {
        /// The declaring type.
        command: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A command declares more than one sequence parameter.
    #[error("command '{command}' declares more than one sequence parameter: {}.", .names.join(", "))]
    MultipleSequenceParameters {
        /// The declaring type.
        command: &'static str,
        /// The sequence parameters.
        names: Vec<String>,
    },

    /// The sequence parameter is followed by another parameter.
    #[error("command '{command}' sequence parameter '{name}' must be the last parameter.")]
    NonLastSequenceParameter {
        /// The declaring type.
        command: &'static str,
        /// The sequence parameter.
        name: String,
    },

    /// A required parameter is ordered after an optional one.
    #[error("command '{command}' required parameter '{name}' follows optional parameter '{optional}'.")]
    RequiredAfterOptional {
        /// The declaring type.
        command: &'static str,
        /// The required parameter.
        name: String,
        /// The optional parameter it follows.
        optional: String,
    },

    /// An option has neither a long nor a short name.
    #[error("command '{command}' declares an option with neither a name nor a short name.")]
    UnnamedOption {
        /// The declaring type.
        command: &'static str,
    },

    /// An option long name breaks the naming contract.
    #[error("command '{command}' has invalid option name '{name}': {reason}.")]
    InvalidOptionName {
        /// The declaring type.
        command: &'static str,
        /// The offending name.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// An option short name breaks the naming contract.
    #[error("command '{command}' has invalid option short name '{short}'.")]
    InvalidShortName {
        /// The declaring type.
        command: &'static str,
        /// The offending short name.
        short: char,
    },

    /// Two options of one command share a long name (ignoring case).
    #[error("command '{command}' declares option '--{name}' more than once.")]
    DuplicateOptionName {
        /// The declaring type.
        command: &'static str,
        /// The repeated name.
        name: String,
    },

    /// Two options of one command share a short name.
    #[error("command '{command}' declares option '-{short}' more than once.")]
    DuplicateShortName {
        /// The declaring type.
        command: &'static str,
        /// The repeated short name.
        short: char,
    },

    /// Two options of one command fall back to the same environment variable.
    #[error("command '{command}' declares environment variable '{variable}' more than once.")]
    DuplicateEnvironmentVariable {
        /// The declaring type.
        command: &'static str,
        /// The repeated variable.
        variable: String,
    },
}
