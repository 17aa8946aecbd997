//! Conversion of raw Cli values into typed values.
//!
//! Every input carries exactly one [`Converter`], chosen when the input is declared:
//! * Types implementing [`Convert`] use the built-in kind table ([`Builtin`]).
//! This covers `bool`, the numeric primitives, `char`, `String`, `PathBuf`, the `chrono` date/time types, durations, enumerations and `Option<T>`.
//! * Any other type needs an explicitly registered converter, such as [`custom`] or [`from_str`].
//!
//! There is no implicit fallback: a custom type only converts when its converter is named at declaration time.
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ValueKind;

mod time;

/// The reasons a raw value cannot convert into its target type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The target requires a value, but none was provided.
    #[error("a value is required.")]
    MissingValue,

    /// The raw value is not a valid representation of the target type.
    #[error("cannot convert '{token}' to {type_name}.")]
    Invalid {
        /// The raw value.
        token: String,
        /// The target type.
        type_name: &'static str,
    },

    /// The raw value does not name any variant of the target enumeration.
    #[error("'{token}' is not one of: {}.", .valid.join(", "))]
    UnknownVariant {
        /// The raw value.
        token: String,
        /// The variant names of the enumeration.
        valid: Vec<String>,
    },

    /// A user-supplied converter rejected the value.
    #[error("{0}")]
    Rejected(String),
}

/// Behaviour for types in the built-in conversion table.
pub trait Convert: Sized {
    /// The kind of value, as described to help renderers.
    fn kind() -> ValueKind;

    /// Convert the raw value; `None` when the input was given without a value.
    fn convert(raw: Option<&str>) -> Result<Self, ConversionError>;
}

/// A converter from raw Cli values into `T`, attached to one input.
pub trait Converter<T>: Send + Sync {
    /// The kind of value, as described to help renderers.
    fn kind(&self) -> ValueKind;

    /// Convert the raw value; `None` when the input was given without a value.
    fn convert(&self, raw: Option<&str>) -> Result<T, ConversionError>;
}

/// The converter for types in the built-in table.
pub struct Builtin<T>(PhantomData<fn() -> T>);

impl<T> Default for Builtin<T> {
    fn default() -> Self {
        Builtin(PhantomData)
    }
}

impl<T: Convert> Converter<T> for Builtin<T> {
    fn kind(&self) -> ValueKind {
        T::kind()
    }

    fn convert(&self, raw: Option<&str>) -> Result<T, ConversionError> {
        T::convert(raw)
    }
}

/// A user-supplied converter function.
/// Build via [`custom`].
pub struct Custom<T, F> {
    function: F,
    _phantom: PhantomData<fn() -> T>,
}

/// Register a converter function for a type outside the built-in table.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::convert::custom;
/// use bindarg::Converter;
///
/// struct Celsius(f64);
///
/// let converter = custom(|raw: Option<&str>| -> Result<Celsius, String> {
///     let raw = raw.ok_or_else(|| "a temperature is required".to_string())?;
///     let degrees = raw.trim_end_matches('C').parse::<f64>().map_err(|e| e.to_string())?;
///     Ok(Celsius(degrees))
/// });
///
/// assert_eq!(converter.convert(Some("21.5C")).ok().map(|c| c.0), Some(21.5));
/// ```
pub fn custom<T, F, E>(function: F) -> Custom<T, F>
where
    F: Fn(Option<&str>) -> Result<T, E> + Send + Sync,
    E: ToString,
{
    Custom {
        function,
        _phantom: PhantomData,
    }
}

impl<T, F, E> Converter<T> for Custom<T, F>
where
    F: Fn(Option<&str>) -> Result<T, E> + Send + Sync,
    E: ToString,
{
    fn kind(&self) -> ValueKind {
        ValueKind::Custom(std::any::type_name::<T>())
    }

    fn convert(&self, raw: Option<&str>) -> Result<T, ConversionError> {
        (self.function)(raw).map_err(|error| ConversionError::Rejected(error.to_string()))
    }
}

/// A converter which delegates to [`std::str::FromStr`].
/// Build via [`from_str`].
pub struct Parsed<T>(PhantomData<fn() -> T>);

/// Register [`std::str::FromStr`] as the converter for a custom type.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::convert::from_str;
/// use bindarg::Converter;
/// use std::net::Ipv4Addr;
///
/// let converter = from_str::<Ipv4Addr>();
/// assert_eq!(converter.convert(Some("127.0.0.1")).unwrap(), Ipv4Addr::LOCALHOST);
/// assert!(converter.convert(Some("localhost")).is_err());
/// ```
pub fn from_str<T: FromStr>() -> Parsed<T> {
    Parsed(PhantomData)
}

impl<T: FromStr> Converter<T> for Parsed<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Custom(std::any::type_name::<T>())
    }

    fn convert(&self, raw: Option<&str>) -> Result<T, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;
        T::from_str(token).map_err(|_| invalid::<T>(token))
    }
}

/// Behaviour for enumerations that convert by (case-insensitive) variant name.
///
/// Typically implemented through the [`enumeration!`](crate::enumeration) macro.
pub trait Enumeration: Sized + Clone + 'static {
    /// Every variant, paired with its name.
    fn variants() -> &'static [(&'static str, Self)];
}

/// The [`ValueKind`] of an [`Enumeration`], listing its variant names.
pub fn enumeration_kind<T: Enumeration>() -> ValueKind {
    ValueKind::Enumeration(
        T::variants()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect(),
    )
}

/// Convert a raw value to the [`Enumeration`] variant it names, ignoring case.
pub fn enumeration<T: Enumeration>(raw: Option<&str>) -> Result<T, ConversionError> {
    let token = raw.ok_or(ConversionError::MissingValue)?;
    let trimmed = token.trim();

    T::variants()
        .iter()
        .find(|(name, _)| crate::model::eq_ignore_case(name, trimmed))
        .map(|(_, variant)| variant.clone())
        .ok_or_else(|| ConversionError::UnknownVariant {
            token: token.to_string(),
            valid: T::variants()
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        })
}

/// Implement [`Enumeration`] and [`Convert`] for a field-less enum.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::{enumeration, Convert, ValueKind};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Colour {
///     Red,
///     DarkBlue,
/// }
///
/// enumeration!(Colour { Red, DarkBlue });
///
/// assert_eq!(Colour::convert(Some("darkblue")).unwrap(), Colour::DarkBlue);
/// assert_eq!(Colour::kind().valid_values(), &["Red".to_string(), "DarkBlue".to_string()]);
/// ```
#[macro_export]
macro_rules! enumeration {
    ($type:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::Enumeration for $type {
            fn variants() -> &'static [(&'static str, Self)] {
                &[$((stringify!($variant), $type::$variant)),+]
            }
        }

        impl $crate::Convert for $type {
            fn kind() -> $crate::ValueKind {
                $crate::convert::enumeration_kind::<Self>()
            }

            fn convert(raw: Option<&str>) -> Result<Self, $crate::ConversionError> {
                $crate::convert::enumeration(raw)
            }
        }
    };
}

pub(crate) fn invalid<T>(token: &str) -> ConversionError {
    ConversionError::Invalid {
        token: token.to_string(),
        type_name: std::any::type_name::<T>(),
    }
}

/// Parse the value ignoring surrounding whitespace; failures report the raw value.
fn parse<T: FromStr>(raw: Option<&str>) -> Result<T, ConversionError> {
    let token = raw.ok_or(ConversionError::MissingValue)?;
    T::from_str(token.trim()).map_err(|_| invalid::<T>(token))
}

impl Convert for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        match raw {
            None => Ok(true),
            Some(token) if token.trim().is_empty() => Ok(true),
            Some(token) if token.trim().eq_ignore_ascii_case("true") => Ok(true),
            Some(token) if token.trim().eq_ignore_ascii_case("false") => Ok(false),
            Some(token) => Err(invalid::<bool>(token)),
        }
    }
}

macro_rules! numeric {
    ($kind:expr => $($t:ty),+) => {
        $(
            impl Convert for $t {
                fn kind() -> ValueKind {
                    $kind
                }

                fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
                    parse(raw)
                }
            }
        )+
    };
}

numeric!(ValueKind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
numeric!(ValueKind::Float => f32, f64);

impl Convert for char {
    fn kind() -> ValueKind {
        ValueKind::Character
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        let token = raw.ok_or(ConversionError::MissingValue)?;

        // A lone whitespace character is itself the value.
        let trimmed = match token.trim() {
            "" => token,
            trimmed => trimmed,
        };
        char::from_str(trimmed).map_err(|_| invalid::<char>(token))
    }
}

impl Convert for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        raw.map(str::to_string).ok_or(ConversionError::MissingValue)
    }
}

impl Convert for PathBuf {
    fn kind() -> ValueKind {
        ValueKind::Path
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        raw.map(PathBuf::from).ok_or(ConversionError::MissingValue)
    }
}

impl<T: Convert> Convert for Option<T> {
    fn kind() -> ValueKind {
        ValueKind::Optional(Box::new(T::kind()))
    }

    fn convert(raw: Option<&str>) -> Result<Self, ConversionError> {
        match raw {
            None => Ok(None),
            Some(token) if token.trim().is_empty() => Ok(None),
            Some(token) => T::convert(Some(token)).map(Some),
        }
    }
}
