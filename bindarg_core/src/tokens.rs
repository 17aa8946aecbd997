#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The identifier of an option, as written on the Cli.
///
/// Identifiers are carried verbatim; matching against the schema decides case handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// `--name`
    Long(String),
    /// `-n`
    Short(char),
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Long(name) => write!(f, "--{name}"),
            Identifier::Short(short) => write!(f, "-{short}"),
        }
    }
}

/// The raw values given to one option identifier, in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionInput {
    identifier: Identifier,
    values: Vec<String>,
}

impl OptionInput {
    /// The identifier, as written.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The raw values; empty for a switch.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The structured form of the Cli tokens, prior to command resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    directives: Vec<String>,
    positionals: Vec<String>,
    options: Vec<OptionInput>,
}

impl CommandInput {
    /// Parse the Cli tokens in a single left-to-right pass.
    ///
    /// * `--name` opens the long option `name`; following tokens are its values until another option.
    /// * `-n` opens the short option `n`, in the same way.
    /// * `-abc` opens the switches `a` and `b`, then opens `c` (which may take values).
    /// * `[name]` is a directive; it never becomes a value.
    /// * Anything else is a positional token while no option is open, otherwise a value.
    ///
    /// Repeating an identifier appends to its values.
    /// Bare `-` and `--` are ordinary tokens.
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{CommandInput, Identifier};
    ///
    /// let input = CommandInput::parse(&["[debug]", "add", "file.txt", "-fv", "--tag", "a", "--tag", "b"]);
    ///
    /// assert_eq!(input.directives(), &["debug".to_string()]);
    /// assert_eq!(input.positionals(), &["add".to_string(), "file.txt".to_string()]);
    /// assert_eq!(input.values(&Identifier::Short('f')), Some(&[][..]));
    /// assert_eq!(input.values(&Identifier::Long("tag".to_string())), Some(&["a".to_string(), "b".to_string()][..]));
    /// ```
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut tokenizer = Tokenizer::default();

        for token in tokens {
            tokenizer.feed(token.as_ref());
        }

        tokenizer.input
    }

    /// The directives (without their brackets), in order.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Whether the directive was given, ignoring case.
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives
            .iter()
            .any(|directive| crate::model::eq_ignore_case(directive, name))
    }

    /// The positional tokens, in order.
    /// The leading tokens may name a command.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// The option inputs, in first-occurrence order.
    pub fn options(&self) -> &[OptionInput] {
        &self.options
    }

    /// The raw values of the exact (verbatim) identifier, if it was given.
    pub fn values(&self, identifier: &Identifier) -> Option<&[String]> {
        self.options
            .iter()
            .find(|option| &option.identifier == identifier)
            .map(|option| option.values.as_slice())
    }
}

#[derive(Debug, Default)]
struct Tokenizer {
    input: CommandInput,
    // Index into `input.options` of the option accepting values.
    open: Option<usize>,
}

impl Tokenizer {
    fn feed(&mut self, token: &str) {
        if token == "-" || token == "--" {
            self.push_value(token);
        } else if let Some(directive) = as_directive(token) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token '{token}' is a directive.");
            }

            self.input.directives.push(directive.to_string());
        } else if let Some(name) = token.strip_prefix("--") {
            self.open(Identifier::Long(name.to_string()));
        } else if let Some(shorts) = token.strip_prefix('-') {
            // Stacked switches; only the final one remains open for values.
            for short in shorts.chars() {
                self.open(Identifier::Short(short));
            }
        } else {
            self.push_value(token);
        }
    }

    fn open(&mut self, identifier: Identifier) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Opening option '{identifier}'.");
        }

        let index = match self
            .input
            .options
            .iter()
            .position(|option| option.identifier == identifier)
        {
            Some(index) => index,
            None => {
                self.input.options.push(OptionInput {
                    identifier,
                    values: Vec::default(),
                });
                self.input.options.len() - 1
            }
        };
        self.open = Some(index);
    }

    fn push_value(&mut self, token: &str) {
        match self.open {
            Some(index) => self.input.options[index].values.push(token.to_string()),
            None => self.input.positionals.push(token.to_string()),
        }
    }
}

fn as_directive(token: &str) -> Option<&str> {
    token.strip_prefix('[')?.strip_suffix(']')
}
