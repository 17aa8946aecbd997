use crate::api::capture::*;
use crate::schema::{OptionSchema, ParameterSchema};

/// A positional parameter of a command.
/// Used with [`CommandBuilder::parameter`](crate::CommandBuilder::parameter).
///
/// Parameters are required unless marked [`Parameter::optional`].
pub struct Parameter<C> {
    order: i32,
    name: String,
    description: Option<String>,
    required: bool,
    field: Box<dyn Bindable<C>>,
}

impl<C> Parameter<C> {
    /// Create a parameter.
    /// Tokens are distributed across the parameters in ascending `order`.
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{Parameter, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Copy {
    ///     source: String,
    /// }
    ///
    /// Parameter::new(0, "source", Scalar::new(|copy: &mut Copy, source| copy.source = source));
    /// ```
    pub fn new(order: i32, name: impl Into<String>, field: impl Bindable<C> + 'static) -> Self {
        Self {
            order,
            name: name.into(),
            description: None,
            required: true,
            field: Box::new(field),
        }
    }

    /// Document the help description for this parameter.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Allow this parameter to be left unset.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub(super) fn consume(self) -> (ParameterSchema, Box<dyn Bindable<C>>) {
        let Parameter {
            order,
            name,
            description,
            required,
            field,
        } = self;
        let schema = ParameterSchema {
            order,
            name,
            description,
            arity: field.arity(),
            kind: field.kind(),
            required,
        };
        (schema, field)
    }
}

/// A named option of a command.
/// Used with [`CommandBuilder::option`](crate::CommandBuilder::option).
///
/// Options are optional unless marked [`NamedOption::required`].
pub struct NamedOption<C> {
    name: Option<String>,
    short: Option<char>,
    environment_variable: Option<String>,
    description: Option<String>,
    required: bool,
    field: Box<dyn Bindable<C>>,
}

impl<C> NamedOption<C> {
    /// Create an option with a long name (`--name`), and optionally a short name (`-n`).
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{NamedOption, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Build {
    ///     verbose: bool,
    /// }
    ///
    /// NamedOption::new("verbose", Some('v'), Scalar::new(|build: &mut Build, verbose| build.verbose = verbose));
    /// ```
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        field: impl Bindable<C> + 'static,
    ) -> Self {
        Self {
            name: Some(name.into()),
            short,
            environment_variable: None,
            description: None,
            required: false,
            field: Box::new(field),
        }
    }

    /// Create an option with only a short name (`-n`).
    pub fn short(short: char, field: impl Bindable<C> + 'static) -> Self {
        Self {
            name: None,
            short: Some(short),
            environment_variable: None,
            description: None,
            required: false,
            field: Box::new(field),
        }
    }

    /// Fall back to the environment variable when the option is absent from the Cli.
    ///
    /// The whole value binds a scalar option.
    /// For a sequence option, the value is split on the platform path list separator (`:`, or `;` on Windows).
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{NamedOption, Sequence};
    /// use std::path::PathBuf;
    ///
    /// #[derive(Default)]
    /// struct Search {
    ///     paths: Vec<PathBuf>,
    /// }
    ///
    /// NamedOption::new("path", None, Sequence::new(|search: &mut Search, paths| search.paths = paths))
    ///     .env("SEARCH_PATH");
    /// ```
    pub fn env(mut self, variable: impl Into<String>) -> Self {
        self.environment_variable.replace(variable.into());
        self
    }

    /// Document the help description for this option.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Require that this option is given at least one value (on the Cli, or through its environment variable).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(super) fn consume(self) -> (OptionSchema, Box<dyn Bindable<C>>) {
        let NamedOption {
            name,
            short,
            environment_variable,
            description,
            required,
            field,
        } = self;
        let schema = OptionSchema {
            name,
            short,
            environment_variable,
            description,
            arity: field.arity(),
            kind: field.kind(),
            required,
            implicit: None,
        };
        (schema, field)
    }
}

impl<C> std::fmt::Debug for Parameter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parameter[{order}, {name}, {arity}, {kind}]",
            order = self.order,
            name = self.name,
            arity = self.field.arity(),
            kind = self.field.kind(),
        )
    }
}

impl<C> std::fmt::Debug for NamedOption<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match &self.name {
            Some(name) => format!("--{name}"),
            None => "".to_string(),
        };
        let short = match &self.short {
            Some(short) => format!(" -{short}"),
            None => "".to_string(),
        };

        write!(
            f,
            "NamedOption[{name}{short}, {arity}, {kind}]",
            arity = self.field.arity(),
            kind = self.field.kind(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Scalar, Sequence};
    use crate::model::{Arity, ValueKind};

    #[derive(Default)]
    struct Target {
        value: u8,
        values: Vec<String>,
    }

    #[test]
    fn parameter_schema() {
        let (schema, _) = Parameter::new(3, "value", Scalar::new(|t: &mut Target, v| t.value = v))
            .description("--discarded--")
            .description("The value.")
            .consume();

        assert_eq!(
            schema,
            ParameterSchema {
                order: 3,
                name: "value".to_string(),
                description: Some("The value.".to_string()),
                arity: Arity::Scalar,
                kind: ValueKind::Integer,
                required: true,
            }
        );
    }

    #[test]
    fn optional_parameter() {
        let values = Sequence::new(|t: &mut Target, v| t.values = v);
        let (schema, _) = Parameter::new(0, "values", values).optional().consume();

        assert!(!schema.is_required());
        assert_eq!(schema.arity(), Arity::Sequence);
        assert_eq!(schema.kind(), &ValueKind::Text);
    }

    #[test]
    fn option_schema() {
        let value = Scalar::new(|t: &mut Target, v| t.value = v);
        let (schema, _) = NamedOption::new("value", Some('v'), value)
            .env("VALUE")
            .required()
            .description("The value.")
            .consume();

        assert_eq!(
            schema,
            OptionSchema {
                name: Some("value".to_string()),
                short: Some('v'),
                environment_variable: Some("VALUE".to_string()),
                description: Some("The value.".to_string()),
                arity: Arity::Scalar,
                kind: ValueKind::Integer,
                required: true,
                implicit: None,
            }
        );
    }

    #[test]
    fn short_option() {
        let values = Sequence::new(|t: &mut Target, v| t.values = v);
        let (schema, _) = NamedOption::short('x', values).consume();

        assert_eq!(schema.name(), None);
        assert_eq!(schema.short(), Some('x'));
        assert!(!schema.is_required());
    }

    #[test]
    fn debug() {
        let value = Scalar::new(|t: &mut Target, v| t.value = v);
        let option = NamedOption::new("value", Some('v'), value);
        assert_eq!(
            format!("{option:?}"),
            "NamedOption[--value -v, Scalar, integer]"
        );

        let values = Sequence::new(|t: &mut Target, v| t.values = v);
        let parameter = Parameter::new(1, "values", values);
        assert_eq!(
            format!("{parameter:?}"),
            "Parameter[1, values, Sequence, text]"
        );
    }
}
