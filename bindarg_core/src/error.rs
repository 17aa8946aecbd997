use thiserror::Error;

use crate::binder::BindingError;
use crate::resolver::ResolutionMiss;
use crate::schema::SchemaError;

/// Any failure of the [`Application::run`](crate::Application::run) pipeline.
///
/// Each stage's error remains matchable through its own variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The command declarations are invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The input names no command.
    #[error(transparent)]
    Resolution(#[from] ResolutionMiss),

    /// The input does not bind onto the resolved command.
    #[error(transparent)]
    Binding(#[from] BindingError),
}
