use std::collections::HashMap;

use thiserror::Error;
#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::schema::{ApplicationSchema, CommandSchema};
use crate::tokens::CommandInput;

/// Error when the input names no declared command, and there is no default command to fall back to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionMiss {
    /// The candidate command name matched nothing.
    #[error("no command matches '{}'.", .candidate.join(" "))]
    Unmatched {
        /// The leading positional tokens considered as the command name.
        candidate: Vec<String>,
    },

    /// No command name was given.
    #[error("a command must be specified.")]
    Unspecified,
}

/// The command selected for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMatch<'s> {
    index: usize,
    command: &'s CommandSchema,
    consumed: usize,
}

impl<'s> CommandMatch<'s> {
    /// The index of the matched command, in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The matched command.
    pub fn command(&self) -> &'s CommandSchema {
        self.command
    }

    /// The number of leading positional tokens which formed the command name.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The positional tokens left over after the command name; these are the parameter input.
    ///
    /// Empty when `input` has fewer positionals than the command name consumed (ie: it is not the resolved input).
    pub fn parameters<'i>(&self, input: &'i CommandInput) -> &'i [String] {
        input.positionals().get(self.consumed..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
    command: Option<usize>,
    children: HashMap<String, Node>,
}

/// The command names, as a trie keyed by lowercase name segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandIndex {
    root: Node,
}

impl CommandIndex {
    pub(crate) fn new(commands: &[CommandSchema]) -> Self {
        let mut root = Node::default();

        for (index, command) in commands.iter().enumerate() {
            let mut node = &mut root;

            if let Some(name) = command.name() {
                for segment in name.split(' ') {
                    node = node.children.entry(segment.to_lowercase()).or_default();
                }
            }

            node.command.get_or_insert(index);
        }

        Self { root }
    }

    /// The longest prefix of `words` which names a command, as `(command index, words consumed)`.
    /// The default command (the root) only matches when no named command does.
    pub(crate) fn longest_match<S: AsRef<str>>(&self, words: &[S]) -> Option<(usize, usize)> {
        let mut node = &self.root;
        let mut best = None;

        for (offset, word) in words.iter().enumerate() {
            match node.children.get(&word.as_ref().to_lowercase()) {
                Some(child) => {
                    node = child;

                    if let Some(index) = node.command {
                        best.replace((index, offset + 1));
                    }
                }
                None => break,
            }
        }

        best.or_else(|| self.root.command.map(|index| (index, 0)))
    }
}

/// The leading positional tokens which may form a command name.
fn candidate(input: &CommandInput) -> &[String] {
    let positionals = input.positionals();
    let end = positionals
        .iter()
        .position(|token| token.is_empty() || token.chars().any(char::is_whitespace))
        .unwrap_or(positionals.len());
    &positionals[..end]
}

impl ApplicationSchema {
    /// Select the command for the input: the longest declared name which prefixes the leading positional tokens (ignoring case).
    /// Falls back to the default command, consuming no tokens.
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{ApplicationBuilder, Command, CommandBuilder, CommandInput};
    ///
    /// #[derive(Default)]
    /// struct Remote;
    ///
    /// impl Command for Remote {
    ///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
    ///         builder.name("remote")
    ///     }
    /// }
    ///
    /// #[derive(Default)]
    /// struct RemoteAdd;
    ///
    /// impl Command for RemoteAdd {
    ///     fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
    ///         builder.name("remote add")
    ///     }
    /// }
    ///
    /// enum Git {
    ///     Remote(Remote),
    ///     RemoteAdd(RemoteAdd),
    /// }
    ///
    /// impl From<Remote> for Git {
    ///     fn from(value: Remote) -> Self {
    ///         Git::Remote(value)
    ///     }
    /// }
    ///
    /// impl From<RemoteAdd> for Git {
    ///     fn from(value: RemoteAdd) -> Self {
    ///         Git::RemoteAdd(value)
    ///     }
    /// }
    ///
    /// let application = ApplicationBuilder::<Git>::default()
    ///     .command::<Remote>()
    ///     .command::<RemoteAdd>()
    ///     .build()
    ///     .unwrap();
    ///
    /// let input = CommandInput::parse(&["Remote", "ADD", "origin"]);
    /// let matched = application.schema().resolve(&input).unwrap();
    /// assert_eq!(matched.command().name(), Some("remote add"));
    /// assert_eq!(matched.parameters(&input), &["origin".to_string()]);
    /// ```
    pub fn resolve(&self, input: &CommandInput) -> Result<CommandMatch<'_>, ResolutionMiss> {
        let candidate = candidate(input);

        match self.index.longest_match(candidate) {
            Some((index, consumed)) => {
                let command = &self.commands[index];

                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Resolved command '{}' (consumed={consumed}).",
                        command.name().unwrap_or("<default>")
                    );
                }

                Ok(CommandMatch {
                    index,
                    command,
                    consumed,
                })
            }
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("No command matches {candidate:?}.");
                }

                let positionals = input.positionals();

                if positionals.is_empty() {
                    Err(ResolutionMiss::Unspecified)
                } else if candidate.is_empty() {
                    Err(ResolutionMiss::Unmatched {
                        candidate: positionals[..1].to_vec(),
                    })
                } else {
                    Err(ResolutionMiss::Unmatched {
                        candidate: candidate.to_vec(),
                    })
                }
            }
        }
    }
}
