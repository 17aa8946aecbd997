//! Core module for `bindarg`.
//! See [documentation root](https://docs.rs/bindarg/latest/bindarg/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod binder;
mod constant;
pub mod convert;
mod error;
mod model;
#[allow(missing_docs)]
pub mod prelude;
mod resolver;
mod schema;
mod tokens;
mod validate;

pub use api::*;
pub use binder::{BindingError, EnvironmentVariables};
pub use convert::{ConversionError, Convert, Converter, Enumeration};
pub use error::Error;
pub use model::*;
pub use resolver::{CommandMatch, ResolutionMiss};
pub use schema::*;
pub use tokens::{CommandInput, Identifier, OptionInput};
pub use validate::{ValidationChain, Validator};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
