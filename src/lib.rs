//! `bindarg` is a declarative command line framework for Rust.
//!
//! Rather than walking the Cli tokens by hand, each command is a plain type which *declares* its parameters and options.
//! `bindarg` resolves the tokens to one of those commands, and binds the values onto a fresh instance of it.
//! Specifically, `bindarg` attempts to prioritize the following design concerns:
//! * *Type safe binding*:
//! The user should not call any `&str -> T` conversion functions directly.
//! Values are converted via a built-in table of kinds, or an explicitly registered converter.
//! * *Domain sensitive binding*:
//! Validators attach to each input, and run on the converted value before it is assigned.
//! * *Parameter vs. option paradigm*:
//! Parameters are specified positionally on the Cli; options are specified via `--..` or `-..` syntax.
//! * *Hierarchical commands*:
//! Commands are named by space delimited paths (ex: `remote add`), resolved by longest prefix.
//! * *Environment fallback*:
//! An option absent from the Cli may take its value from an environment variable.
//! * *Schema first*:
//! The declarations form an immutable [`ApplicationSchema`], validated once and readable by help renderers.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/greeter.rs")]
//! ```
//!
//! ```console
//! $ greeter greet Ada Grace --times 2
//! Hello, Ada!
//! Hello, Grace!
//! Hello, Ada!
//! Hello, Grace!
//!
//! $ GREETER_TIMES=1 greeter greet Ada --tone formal
//! Good day, Ada!
//!
//! $ greeter greet Ada
//! Error: missing required option(s): --times.
//!
//! $ greeter --version
//! greeter 0.3.0
//! ```
//!
//! # Declaring commands
//! Implement [`Command`] for a `Default` type, and declare its inputs on the [`CommandBuilder`].
//! Each input takes a *field*, which describes how to assign the converted value(s) onto the command:
//! * [`Scalar`]: binds a single value (or none, for `bool` switches and `Option<T>` targets).
//! * [`Sequence`]: binds any number of values, collected into a [`Collectable`](prelude::Collectable) (ex: `Vec<T>`, `HashSet<T>`).
//!
//! Then, gather the commands into an [`Application`] with the [`ApplicationBuilder`].
//! Every command converts `Into` the application's output type, typically an enum with one variant per command.
//!
//! ### Parameters
//! Positional tokens (after the command name) are distributed across the parameters in ascending order.
//! A scalar parameter takes one token; the (at most one, last) sequence parameter takes the rest.
//! Parameters are required unless marked optional, and required parameters must precede optional ones.
//!
//! ### Options
//! Options are optional unless marked required.
//! A required option must be given at least one value, on the Cli or through its environment variable.
//! Repeated options accumulate their values: `--tag a --tag b` binds `[a, b]`.
//!
//! # Token grammar
//! * `--name` opens the long option `name` (matched ignoring case).
//! Following tokens are its values, until the next option.
//! * `-n` opens the short option `n` (matched exactly).
//! * `-abc` sets the switches `a` and `b`, and opens `c`.
//! * `[name]` is a directive (ex: `[debug]`), available via [`CommandInput::has_directive`].
//! * Any other token is a positional token (when no option is open), or a value.
//! Bare `-` and `--` are ordinary tokens.
//!
//! The grammar is strict: `-5` is the short option `5`, and `--name=value` is the long option `name=value`.
//! So, negative numbers are given through an environment variable (or a custom converter with its own spelling).
//! ```
//! use bindarg::{
//!     ApplicationBuilder, BindingError, Command, CommandBuilder, EnvironmentVariables, Error,
//!     NamedOption, Outcome, Scalar,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Shift {
//!     offset: i32,
//! }
//!
//! impl Command for Shift {
//!     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
//!         builder.option(
//!             NamedOption::new("offset", None, Scalar::new(|s: &mut Shift, offset| s.offset = offset))
//!                 .env("SHIFT_OFFSET"),
//!         )
//!     }
//! }
//!
//! let application = ApplicationBuilder::<Shift>::default()
//!     .command::<Shift>()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     application.run(&["--offset", "-5"], &EnvironmentVariables::default()),
//!     Err(Error::Binding(BindingError::UnrecognizedOptions(vec!["-5".to_string()])))
//! );
//!
//! let environment: EnvironmentVariables = [("SHIFT_OFFSET", "-5")].into_iter().collect();
//! let tokens: &[&str] = &[];
//! assert_eq!(
//!     application.run(tokens, &environment),
//!     Ok(Outcome::Command(Shift { offset: -5 }))
//! );
//! ```
//!
//! Every command implicitly gains `--help`/`-h`, and the default command gains `--version`.
//! [`Application::run`] answers these with an [`Outcome`] rather than binding the command.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while parsing, resolving and binding.
pub use bindarg_core::*;
