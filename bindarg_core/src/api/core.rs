#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::capture::*;
use crate::api::{NamedOption, Parameter};
use crate::binder::{self, Assign, BindingError, EnvironmentVariables, InvalidBinding};
use crate::constant::DEFAULT_VERSION;
use crate::error::Error;
use crate::resolver::{CommandIndex, CommandMatch, ResolutionMiss};
use crate::schema::{
    check_application, sort_by_order, ApplicationSchema, CommandSchema, ImplicitOption,
    OptionSchema, ParameterSchema, SchemaError,
};
use crate::tokens::CommandInput;

/// Behaviour for a type which is bound from the Cli as a command.
///
/// The instance starts out as `Default::default()`; inputs which are not given keep their default value.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::{Command, CommandBuilder, NamedOption, Parameter, Scalar};
///
/// #[derive(Default)]
/// struct Greet {
///     name: String,
///     loud: bool,
/// }
///
/// impl Command for Greet {
///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
///         builder
///             .name("greet")
///             .description("Greet someone.")
///             .parameter(Parameter::new(0, "name", Scalar::new(|greet: &mut Greet, name| greet.name = name)))
///             .option(NamedOption::new("loud", Some('l'), Scalar::new(|greet: &mut Greet, loud| greet.loud = loud)))
///     }
/// }
/// ```
pub trait Command: Default + 'static {
    /// Declare the name, description, parameters and options of this command.
    fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self>;
}

/// The declaration of one command.
/// Passed to [`Command::declare`].
pub struct CommandBuilder<C> {
    name: Option<String>,
    description: Option<String>,
    parameters: Vec<(ParameterSchema, Box<dyn Bindable<C>>)>,
    options: Vec<(OptionSchema, Box<dyn Bindable<C>>)>,
}

impl<C: Command> CommandBuilder<C> {
    fn new() -> Self {
        Self {
            name: None,
            description: None,
            parameters: Vec::default(),
            options: Vec::default(),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Create a [`CommandBuilder`] for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{Command, CommandBuilder, EnvironmentVariables, Outcome, Parameter, Scalar};
    ///
    /// #[derive(Debug, Default, PartialEq)]
    /// struct Sleep {
    ///     seconds: u32,
    /// }
    ///
    /// impl Command for Sleep {
    ///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
    ///         builder.parameter(Parameter::new(0, "seconds", Scalar::new(|sleep: &mut Sleep, seconds| sleep.seconds = seconds)))
    ///     }
    /// }
    ///
    /// let application = Sleep::declare(CommandBuilder::test_dummy())
    ///     .build_application()
    ///     .unwrap();
    /// let outcome = application.run(&["5"], &EnvironmentVariables::default()).unwrap();
    /// assert_eq!(outcome, Outcome::Command(Sleep { seconds: 5 }));
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Self::new()
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build an [`Application`] of just this command.
    /// See [`CommandBuilder::test_dummy`] for an example.
    #[cfg(feature = "unit_test")]
    pub fn build_application(self) -> Result<Application<C>, SchemaError> {
        ApplicationBuilder::default().declared(self).build()
    }

    /// Name this command.
    /// A command without a name is the default command, selected when the input names no other command.
    ///
    /// Names are space delimited paths (ex: `"remote add"`), matched against the input ignoring case.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name.replace(name.into());
        self
    }

    /// Document the help description for this command.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Add a positional parameter to the command.
    pub fn parameter(mut self, parameter: Parameter<C>) -> Self {
        self.parameters.push(parameter.consume());
        self
    }

    /// Add a named option to the command.
    pub fn option(mut self, option: NamedOption<C>) -> Self {
        self.options.push(option.consume());
        self
    }

    fn build(self) -> (CommandSchema, Activator<C>) {
        let CommandBuilder {
            name,
            description,
            parameters,
            options,
        } = self;
        let (parameters, parameter_fields) = sort_by_order(parameters);
        let (mut options, option_fields): (Vec<OptionSchema>, Vec<Box<dyn Bindable<C>>>) =
            options.into_iter().unzip();
        let mut option_fields: Vec<Option<Box<dyn Bindable<C>>>> =
            option_fields.into_iter().map(Some).collect();

        options.push(OptionSchema::help());
        option_fields.push(None);

        if name.is_none() {
            options.push(OptionSchema::version());
            option_fields.push(None);
        }

        let schema = CommandSchema {
            type_name: std::any::type_name::<C>(),
            name,
            description,
            parameters,
            options,
        };
        let activator = Activator {
            parameters: parameter_fields,
            options: option_fields,
        };
        (schema, activator)
    }
}

/// The fields of one command, aligned with its schema's parameters and options.
/// Implicit options have no field.
struct Activator<C> {
    parameters: Vec<Box<dyn Bindable<C>>>,
    options: Vec<Option<Box<dyn Bindable<C>>>>,
}

struct Binding<'a, C> {
    activator: &'a Activator<C>,
    instance: &'a mut C,
}

impl<'a, C> Assign for Binding<'a, C> {
    fn parameter(&mut self, index: usize, values: &[String]) -> Result<(), InvalidBinding> {
        self.activator.parameters[index].bind(self.instance, values)
    }

    fn option(&mut self, index: usize, values: &[String]) -> Result<(), InvalidBinding> {
        match &self.activator.options[index] {
            Some(field) => field.bind(self.instance, values),
            None => Ok(()),
        }
    }
}

/// Behaviour to bind a fresh command instance, and convert it into the application's output type `O`.
///
/// We use this to erase the command type, so that every command of the application sits together.
trait Activate<O>: Send + Sync {
    fn activate(
        &self,
        command: &CommandSchema,
        input: &CommandInput,
        parameters: &[String],
        environment: &EnvironmentVariables,
    ) -> Result<O, BindingError>;
}

impl<C, O> Activate<O> for Activator<C>
where
    C: Command + Into<O>,
{
    fn activate(
        &self,
        command: &CommandSchema,
        input: &CommandInput,
        parameters: &[String],
        environment: &EnvironmentVariables,
    ) -> Result<O, BindingError> {
        let mut instance = C::default();
        let mut binding = Binding {
            activator: self,
            instance: &mut instance,
        };
        binder::bind(command, input, parameters, environment, &mut binding)?;
        Ok(instance.into())
    }
}

/// Descriptive details of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationMetadata {
    title: Option<String>,
    version: String,
    description: Option<String>,
}

impl Default for ApplicationMetadata {
    fn default() -> Self {
        Self {
            title: None,
            version: DEFAULT_VERSION.to_string(),
            description: None,
        }
    }
}

impl ApplicationMetadata {
    /// The title, if documented.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The version; `0.0.0` unless documented.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The description, if documented.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The builder for an [`Application`].
///
/// Every command converts into the output type `O`, typically an enum with one variant per command.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::{ApplicationBuilder, Command, CommandBuilder, EnvironmentVariables, NamedOption, Outcome, Parameter, Scalar, Sequence};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Status {
///     short: bool,
/// }
///
/// impl Command for Status {
///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
///         builder
///             .name("status")
///             .option(NamedOption::new("short", Some('s'), Scalar::new(|status: &mut Status, short| status.short = short)))
///     }
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Add {
///     paths: Vec<String>,
/// }
///
/// impl Command for Add {
///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
///         builder
///             .name("add")
///             .parameter(Parameter::new(0, "paths", Sequence::new(|add: &mut Add, paths| add.paths = paths)))
///     }
/// }
///
/// #[derive(Debug, PartialEq)]
/// enum Git {
///     Status(Status),
///     Add(Add),
/// }
/// # impl From<Status> for Git {
/// #     fn from(value: Status) -> Self {
/// #         Git::Status(value)
/// #     }
/// # }
/// # impl From<Add> for Git {
/// #     fn from(value: Add) -> Self {
/// #         Git::Add(value)
/// #     }
/// # }
///
/// let application = ApplicationBuilder::<Git>::default()
///     .title("git")
///     .version("2.43.0")
///     .command::<Status>()
///     .command::<Add>()
///     .build()
///     .unwrap();
/// let environment = EnvironmentVariables::default();
///
/// assert_eq!(
///     application.run(&["status", "-s"], &environment).unwrap(),
///     Outcome::Command(Git::Status(Status { short: true }))
/// );
/// assert_eq!(
///     application.run(&["add", "a.txt", "b.txt"], &environment).unwrap(),
///     Outcome::Command(Git::Add(Add { paths: vec!["a.txt".to_string(), "b.txt".to_string()] }))
/// );
/// assert!(application.run(&["commit"], &environment).is_err());
/// ```
pub struct ApplicationBuilder<O> {
    metadata: ApplicationMetadata,
    commands: Vec<CommandSchema>,
    activators: Vec<Box<dyn Activate<O>>>,
}

impl<O> Default for ApplicationBuilder<O> {
    fn default() -> Self {
        Self {
            metadata: ApplicationMetadata::default(),
            commands: Vec::default(),
            activators: Vec::default(),
        }
    }
}

impl<O> ApplicationBuilder<O> {
    /// Document the title of the application.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title.replace(title.into());
        self
    }

    /// Document the version of the application, reported for `--version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.metadata.version = version.into();
        self
    }

    /// Document the description of the application.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description.replace(description.into());
        self
    }

    /// Add the command `C` to the application.
    pub fn command<C>(self) -> Self
    where
        C: Command + Into<O>,
    {
        self.declared(C::declare(CommandBuilder::new()))
    }

    fn declared<C>(mut self, builder: CommandBuilder<C>) -> Self
    where
        C: Command + Into<O>,
    {
        let (schema, activator) = builder.build();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Declared command '{}' as '{}'.",
                schema.type_name(),
                schema.name().unwrap_or("<default>")
            );
        }

        self.commands.push(schema);
        self.activators.push(Box::new(activator));
        self
    }

    /// Build the application.
    /// This finalizes the declarations and checks them for errors (ex: a repeated command name).
    pub fn build(self) -> Result<Application<O>, SchemaError> {
        let ApplicationBuilder {
            metadata,
            commands,
            activators,
        } = self;
        check_application(&commands)?;
        let index = CommandIndex::new(&commands);

        Ok(Application {
            metadata,
            schema: ApplicationSchema { commands, index },
            activators,
        })
    }
}

/// The result of running an application against the Cli tokens.
#[derive(Debug, PartialEq)]
pub enum Outcome<'a, O> {
    /// The bound command.
    Command(O),
    /// Help was requested for the command.
    Help(&'a CommandSchema),
    /// The version was requested.
    Version(&'a str),
}

/// A built application: its schema, and the means to bind each of its commands.
///
/// Build via [`ApplicationBuilder`].
/// Immutable, and may be shared across threads.
pub struct Application<O> {
    metadata: ApplicationMetadata,
    schema: ApplicationSchema,
    activators: Vec<Box<dyn Activate<O>>>,
}

impl<O> Application<O> {
    /// The descriptive details of the application.
    pub fn metadata(&self) -> &ApplicationMetadata {
        &self.metadata
    }

    /// The schema of every declared command.
    pub fn schema(&self) -> &ApplicationSchema {
        &self.schema
    }

    /// Parse the Cli tokens.
    /// See [`CommandInput::parse`].
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> CommandInput {
        CommandInput::parse(tokens)
    }

    /// Select the command for the input.
    /// See [`ApplicationSchema::resolve`].
    pub fn resolve(&self, input: &CommandInput) -> Result<CommandMatch<'_>, ResolutionMiss> {
        self.schema.resolve(input)
    }

    /// Bind the input onto a fresh instance of the matched command.
    ///
    /// The match must come from this application's [`Application::resolve`], otherwise [`BindingError::ForeignMatch`].
    /// The input should be the one it was resolved from.
    pub fn bind(
        &self,
        matched: &CommandMatch<'_>,
        input: &CommandInput,
        environment: &EnvironmentVariables,
    ) -> Result<O, BindingError> {
        let index = matched.index();
        let owned = self
            .schema
            .commands()
            .get(index)
            .filter(|command| std::ptr::eq(*command, matched.command()));

        match (owned, self.activators.get(index)) {
            (Some(command), Some(activator)) => {
                activator.activate(command, input, matched.parameters(input), environment)
            }
            _ => Err(BindingError::ForeignMatch(matched.command().type_name().to_string())),
        }
    }

    /// Parse, resolve and bind the Cli tokens.
    ///
    /// A request for help (`--help`/`-h`), or for the version (`--version`, default command only), is answered without binding.
    /// So, missing required inputs do not mask a help request.
    pub fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        environment: &EnvironmentVariables,
    ) -> Result<Outcome<'_, O>, Error> {
        let input = self.parse(tokens);
        let matched = self.resolve(&input)?;
        let command = matched.command();

        if requested(command, &input, ImplicitOption::Help) {
            return Ok(Outcome::Help(command));
        }

        if requested(command, &input, ImplicitOption::Version) {
            return Ok(Outcome::Version(self.metadata.version()));
        }

        Ok(Outcome::Command(self.bind(&matched, &input, environment)?))
    }
}

impl<O> std::fmt::Debug for Application<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("metadata", &self.metadata)
            .field("schema", &self.schema)
            .finish()
    }
}

fn requested(command: &CommandSchema, input: &CommandInput, implicit: ImplicitOption) -> bool {
    command.implicit_option(implicit).map_or(false, |option| {
        input
            .options()
            .iter()
            .any(|given| option.matches(given.identifier()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Scalar, Sequence};
    use crate::convert::ConversionError;
    use crate::model::{Arity, ValueKind};
    use crate::test::assert_contains;
    use crate::validate::Validator;
    use rstest::rstest;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    enum Level {
        Value1,
        Value2,
    }

    crate::enumeration!(Level { Value1, Value2 });

    #[derive(Debug, Default, PartialEq)]
    struct Root {
        level: Option<Level>,
        limit: Option<u32>,
    }

    impl Command for Root {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let level = Scalar::new(|root: &mut Root, level| root.level = Some(level));
            let limit = Scalar::new(|root: &mut Root, limit| root.limit = limit);
            builder
                .description("The default command.")
                .option(NamedOption::new("level", Some('l'), level))
                .option(NamedOption::new("limit", None, limit))
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Add {
        path: PathBuf,
        rest: Vec<String>,
        count: i16,
        force: bool,
        tags: Vec<String>,
    }

    struct Positive;

    impl Validator<i16> for Positive {
        fn validate(&self, value: &i16) -> Result<(), String> {
            if *value > 0 {
                Ok(())
            } else {
                Err("must be positive".to_string())
            }
        }
    }

    impl Command for Add {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let rest = Sequence::new(|add: &mut Add, rest| add.rest = rest);
            let path = Scalar::new(|add: &mut Add, path| add.path = path);
            let count = Scalar::new(|add: &mut Add, count| add.count = count).validate(Positive);
            let force = Scalar::new(|add: &mut Add, force| add.force = force);
            let tags = Sequence::new(|add: &mut Add, tags| add.tags = tags);
            builder
                .name("add")
                .parameter(Parameter::new(5, "rest", rest).optional())
                .parameter(Parameter::new(1, "path", path))
                .option(
                    NamedOption::new("count", Some('c'), count)
                        .env("ADD_COUNT")
                        .required(),
                )
                .option(NamedOption::short('f', force))
                .option(NamedOption::new("tag", None, tags).env("ADD_TAGS"))
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct RemoteAdd {
        name: String,
    }

    impl Command for RemoteAdd {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let name = Scalar::new(|remote: &mut RemoteAdd, name| remote.name = name);
            builder
                .name("remote add")
                .parameter(Parameter::new(0, "name", name))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Program {
        Root(Root),
        Add(Add),
        RemoteAdd(RemoteAdd),
    }

    impl From<Root> for Program {
        fn from(value: Root) -> Self {
            Program::Root(value)
        }
    }

    impl From<Add> for Program {
        fn from(value: Add) -> Self {
            Program::Add(value)
        }
    }

    impl From<RemoteAdd> for Program {
        fn from(value: RemoteAdd) -> Self {
            Program::RemoteAdd(value)
        }
    }

    fn application() -> Application<Program> {
        ApplicationBuilder::default()
            .title("program")
            .version("1.2.3")
            .command::<Root>()
            .command::<Add>()
            .command::<RemoteAdd>()
            .build()
            .unwrap()
    }

    fn environment(pairs: &[(&str, &str)]) -> EnvironmentVariables {
        pairs.iter().copied().collect()
    }

    fn run(tokens: &[&str], environment: &EnvironmentVariables) -> Result<Program, Error> {
        match application().run(tokens, environment)? {
            Outcome::Command(program) => Ok(program),
            outcome => panic!("unexpected outcome: {outcome:?}"),
        }
    }

    fn root(level: Option<Level>, limit: Option<u32>) -> Root {
        Root { level, limit }
    }

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn schema_idempotent() {
        assert_eq!(application().schema(), application().schema());
        is_send_sync::<Application<Program>>();
        is_send_sync::<ApplicationSchema>();
    }

    #[test]
    fn schema_shape() {
        // Setup
        let application = application();

        // Execute
        let add = application.schema().find("add").unwrap();

        // Verify
        assert!(add.type_name().ends_with("Add"));
        let parameters: Vec<(&str, bool)> = add
            .parameters()
            .iter()
            .map(|p| (p.name(), p.is_required()))
            .collect();
        assert_eq!(parameters, vec![("path", true), ("rest", false)]);
        let options: Vec<String> = add
            .options()
            .iter()
            .map(|o| o.identifier().to_string())
            .collect();
        assert_eq!(options, vec!["--count", "-f", "--tag", "--help"]);
        assert_eq!(add.options()[0].kind(), &ValueKind::Integer);
        assert_eq!(add.options()[2].arity(), Arity::Sequence);
        assert_eq!(add.options()[2].environment_variable(), Some("ADD_TAGS"));

        let root = application.schema().default_command().unwrap();
        assert_eq!(root.description(), Some("The default command."));
        assert!(root.implicit_option(ImplicitOption::Version).is_some());
        assert_eq!(
            root.options()[0].kind().valid_values(),
            &["Value1".to_string(), "Value2".to_string()]
        );
        assert_eq!(application.metadata().title(), Some("program"));
    }

    #[test]
    fn bind_full() {
        let program = run(
            &[
                "add", "file.txt", "x", "y", "--count", "15", "-f", "--tag", "a", "--TAG", "b",
            ],
            &EnvironmentVariables::default(),
        )
        .unwrap();

        assert_eq!(
            program,
            Program::Add(Add {
                path: PathBuf::from("file.txt"),
                rest: vec!["x".to_string(), "y".to_string()],
                count: 15,
                force: true,
                tags: vec!["a".to_string(), "b".to_string()],
            })
        );
    }

    #[rstest]
    #[case(vec![], Root::default())]
    #[case(vec!["--level", "value2"], root(Some(Level::Value2), None))]
    #[case(vec!["-l", "VALUE1", "--limit", "3"], root(Some(Level::Value1), Some(3)))]
    #[case(vec!["--limit"], Root::default())]
    fn bind_default(#[case] tokens: Vec<&str>, #[case] expected: Root) {
        assert_eq!(
            run(&tokens, &EnvironmentVariables::default()).unwrap(),
            Program::Root(expected)
        );
    }

    #[test]
    fn bind_nested() {
        assert_eq!(
            run(&["Remote", "add", "origin"], &environment(&[])).unwrap(),
            Program::RemoteAdd(RemoteAdd {
                name: "origin".to_string(),
            })
        );
    }

    #[test]
    fn environment_fallback() {
        let list = format!("x{}y", crate::constant::PATH_LIST_SEPARATOR);
        let environment = environment(&[("ADD_COUNT", "7"), ("ADD_TAGS", list.as_str())]);

        assert_matches!(run(&["add", "file.txt"], &environment), Ok(Program::Add(add)) => {
            assert_eq!(add.count, 7);
            assert_eq!(add.tags, vec!["x".to_string(), "y".to_string()]);
        });
        assert_matches!(
            run(&["add", "file.txt", "-c", "2", "--tag", "z"], &environment),
            Ok(Program::Add(add)) => {
                assert_eq!(add.count, 2);
                assert_eq!(add.tags, vec!["z".to_string()]);
            }
        );
    }

    #[test]
    fn missing_aggregated() {
        assert_eq!(
            run(&["add", "file.txt"], &EnvironmentVariables::default()),
            Err(Error::Binding(BindingError::MissingOptions(vec!["--count".to_string()])))
        );
        assert_eq!(
            run(&["add", "-c", "1"], &EnvironmentVariables::default()),
            Err(Error::Binding(BindingError::MissingParameters(vec!["path".to_string()])))
        );
    }

    #[test]
    fn binding_errors() {
        let none = EnvironmentVariables::default();

        assert_matches!(
            run(&["add", "file.txt", "-c", "x"], &none),
            Err(Error::Binding(BindingError::Conversion { input, error })) => {
                assert_eq!(input, "--count");
                assert_matches!(error, ConversionError::Invalid { .. });
            }
        );
        assert_eq!(
            run(&["add", "file.txt", "-c", "-3"], &none),
            Err(Error::Binding(BindingError::UnrecognizedOptions(vec!["-3".to_string()])))
        );
        assert_eq!(
            run(&["add", "file.txt", "-c", "0"], &none),
            Err(Error::Binding(BindingError::Validation {
                input: "--count".to_string(),
                failures: vec!["must be positive".to_string()],
            }))
        );
        assert_eq!(
            run(&["add", "file.txt", "-c", "1", "2"], &none),
            Err(Error::Binding(BindingError::Arity {
                input: "--count".to_string(),
                provided: 2,
            }))
        );
        assert_eq!(
            run(&["remote", "add", "a", "b"], &none),
            Err(Error::Binding(BindingError::UnexpectedParameters(vec!["b".to_string()])))
        );
    }

    #[rstest]
    #[case(vec!["--help"], None)]
    #[case(vec!["add", "-h"], Some("add"))]
    #[case(vec!["add", "--HELP", "--count"], Some("add"))]
    #[case(vec!["remote", "add", "--help"], Some("remote add"))]
    fn help(#[case] tokens: Vec<&str>, #[case] expected: Option<&str>) {
        let application = application();
        let outcome = application
            .run(&tokens, &EnvironmentVariables::default())
            .unwrap();
        assert_matches!(outcome, Outcome::Help(command) => {
            assert_eq!(command.name(), expected);
        });
    }

    #[test]
    fn version() {
        let application = application();
        let none = EnvironmentVariables::default();
        assert_eq!(
            application.run(&["--version"], &none).unwrap(),
            Outcome::Version("1.2.3")
        );
        assert_eq!(
            application.run(&["add", "--version"], &none),
            Err(Error::Binding(BindingError::UnrecognizedOptions(vec!["--version".to_string()])))
        );
    }

    #[test]
    fn resolution_miss() {
        let application: Application<Program> = ApplicationBuilder::default()
            .command::<Add>()
            .build()
            .unwrap();
        assert_eq!(
            application.run(&["commit"], &EnvironmentVariables::default()),
            Err(Error::Resolution(ResolutionMiss::Unmatched {
                candidate: vec!["commit".to_string()],
            }))
        );
        assert_eq!(application.metadata().version(), "0.0.0");
    }

    #[test]
    fn staged_pipeline() {
        let application = application();
        let input = application.parse(&["add", "file.txt", "-c", "1"]);
        let matched = application.resolve(&input).unwrap();
        assert_eq!(matched.command().name(), Some("add"));

        let program = application
            .bind(&matched, &input, &EnvironmentVariables::default())
            .unwrap();
        assert_matches!(program, Program::Add(Add { count: 1, .. }));
    }

    #[test]
    fn bind_other_input() {
        // Setup
        let application = application();
        let input = application.parse(&["remote", "add", "origin"]);
        let matched = application.resolve(&input).unwrap();
        let other = application.parse(&["x"]);

        // Execute
        let result = application.bind(&matched, &other, &EnvironmentVariables::default());

        // Verify
        assert_eq!(
            result,
            Err(BindingError::MissingParameters(vec!["name".to_string()]))
        );
    }

    #[test]
    fn bind_foreign_match() {
        // Setup
        let resolver: Application<Program> = ApplicationBuilder::default()
            .command::<RemoteAdd>()
            .command::<Add>()
            .command::<Root>()
            .build()
            .unwrap();
        let application = application();
        let input = resolver.parse(&["remote", "add", "origin"]);
        let matched = resolver.resolve(&input).unwrap();

        // Execute
        let result = application.bind(&matched, &input, &EnvironmentVariables::default());

        // Verify
        assert_matches!(result, Err(BindingError::ForeignMatch(type_name)) => {
            assert!(type_name.ends_with("RemoteAdd"));
        });

        let input = CommandInput::parse(&["remote", "add", "origin"]);
        let schema = application.schema().clone();
        let matched = schema.resolve(&input).unwrap();
        assert_matches!(
            application.bind(&matched, &input, &EnvironmentVariables::default()),
            Err(BindingError::ForeignMatch(_))
        );
    }

    #[derive(Debug, Default)]
    struct DuplicateOrder {
        a: u8,
        b: u8,
    }

    impl Command for DuplicateOrder {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let a = Scalar::new(|c: &mut DuplicateOrder, a| c.a = a);
            let b = Scalar::new(|c: &mut DuplicateOrder, b| c.b = b);
            builder
                .parameter(Parameter::new(0, "a", a))
                .parameter(Parameter::new(0, "b", b))
        }
    }

    #[derive(Debug, Default)]
    struct NonLastSequence {
        a: Vec<u8>,
        b: u8,
    }

    impl Command for NonLastSequence {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let a = Sequence::new(|c: &mut NonLastSequence, a| c.a = a);
            let b = Scalar::new(|c: &mut NonLastSequence, b| c.b = b);
            builder
                .parameter(Parameter::new(0, "a", a))
                .parameter(Parameter::new(1, "b", b))
        }
    }

    #[derive(Debug, Default)]
    struct DuplicateShort {
        a: bool,
        b: bool,
    }

    impl Command for DuplicateShort {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            let a = Scalar::new(|c: &mut DuplicateShort, a| c.a = a);
            let b = Scalar::new(|c: &mut DuplicateShort, b| c.b = b);
            builder
                .name("short")
                .option(NamedOption::new("aa", Some('x'), a))
                .option(NamedOption::new("bb", Some('x'), b))
        }
    }

    #[derive(Debug, Default)]
    struct Upper;

    impl Command for Upper {
        fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
            builder.name("REMOTE ADD")
        }
    }

    #[derive(Debug)]
    struct Any;

    macro_rules! into_any {
        ($($command:ty),+) => {
            $(
                impl From<$command> for Any {
                    fn from(_: $command) -> Self {
                        Any
                    }
                }
            )+
        };
    }

    into_any!(DuplicateOrder, NonLastSequence, DuplicateShort);
    into_any!(RemoteAdd, Upper);

    fn build<C: Command + Into<Any>>() -> Result<Application<Any>, SchemaError> {
        ApplicationBuilder::default().command::<C>().build()
    }

    #[test]
    fn schema_rejections() {
        assert_matches!(
            build::<DuplicateOrder>(),
            Err(SchemaError::DuplicateParameterOrder { order: 0, .. })
        );
        assert_matches!(
            build::<NonLastSequence>(),
            Err(SchemaError::NonLastSequenceParameter { name, .. }) => {
                assert_eq!(name, "a");
            }
        );
        assert_matches!(
            build::<DuplicateShort>(),
            Err(SchemaError::DuplicateShortName { short: 'x', .. })
        );
        assert_matches!(
            ApplicationBuilder::<Any>::default()
                .command::<RemoteAdd>()
                .command::<Upper>()
                .build(),
            Err(SchemaError::DuplicateCommandName { name, .. }) => {
                assert_eq!(name, "REMOTE ADD");
            }
        );
        assert_eq!(
            ApplicationBuilder::<Any>::default().build().unwrap_err(),
            SchemaError::NoCommands
        );
    }

    #[test]
    fn error_messages() {
        let error = build::<DuplicateShort>().unwrap_err();
        assert_contains!(error.to_string(), "declares option '-x' more than once");
    }

    #[test]
    #[cfg(feature = "unit_test")]
    fn test_dummies() {
        // Setup
        fn setup_fn(builder: CommandBuilder<RemoteAdd>) -> CommandBuilder<RemoteAdd> {
            let name = Scalar::new(|remote: &mut RemoteAdd, name| remote.name = name);
            builder.parameter(Parameter::new(0, "name", name))
        }

        let application = setup_fn(CommandBuilder::test_dummy())
            .build_application()
            .unwrap();

        // Execute
        let outcome = application
            .run(&["upstream"], &EnvironmentVariables::default())
            .unwrap();

        // Verify
        assert_eq!(
            outcome,
            Outcome::Command(RemoteAdd {
                name: "upstream".to_string(),
            })
        );
    }
}
