/// Whether an input binds a single raw value or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Precisely one value (or none, for switches and nullable targets).
    Scalar,
    /// Any number of values, collected into a single target.
    Sequence,
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The declared kind of value an input converts into.
///
/// This is descriptive metadata only; it lets a help renderer show types and valid values without touching the conversion machinery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`; a bare switch means `true`.
    Boolean,
    /// Any signed or unsigned integer.
    Integer,
    /// `f32` or `f64`.
    Float,
    /// A single `char`.
    Character,
    /// Free-form text.
    Text,
    /// A file system path.
    Path,
    /// A calendar date (`2024-01-31`).
    Date,
    /// A time of day (`23:59:00`).
    Time,
    /// A date and time, optionally with an offset.
    DateTime,
    /// A time span (`[-][d.]hh:mm[:ss[.fffffff]]`).
    Duration,
    /// One of a closed set of names, matched case-insensitively.
    Enumeration(Vec<String>),
    /// A nullable wrapper; no value means no value.
    Optional(Box<ValueKind>),
    /// A type converted by an explicitly registered converter.
    Custom(&'static str),
}

impl ValueKind {
    /// The valid values for this kind, if it is (or wraps) an enumeration.
    pub fn valid_values(&self) -> &[String] {
        match self {
            ValueKind::Enumeration(values) => values,
            ValueKind::Optional(inner) => inner.valid_values(),
            _ => &[],
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Character => write!(f, "character"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Path => write!(f, "path"),
            ValueKind::Date => write!(f, "date"),
            ValueKind::Time => write!(f, "time"),
            ValueKind::DateTime => write!(f, "date-time"),
            ValueKind::Duration => write!(f, "duration"),
            ValueKind::Enumeration(values) => write!(f, "one of {{{}}}", values.join(", ")),
            ValueKind::Optional(inner) => write!(f, "{inner}?"),
            ValueKind::Custom(type_name) => write!(f, "{type_name}"),
        }
    }
}

/// Compare two names the way long names and command names are compared.
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right) || left.to_lowercase() == right.to_lowercase()
}
