use crate::binder::InvalidBinding;
use crate::model::{Arity, ValueKind};

/// Behaviour to bind raw values onto one field of the command instance `C`.
///
/// We use this to erase the field's value type, so that inputs of differing types sit together in one command.
#[doc(hidden)]
pub trait Bindable<C>: Send + Sync {
    /// Whether the field takes one value or many.
    fn arity(&self) -> Arity;

    /// The kind of value the field converts into.
    fn kind(&self) -> ValueKind;

    /// Convert, validate and assign the raw values onto the instance.
    fn bind(&self, instance: &mut C, values: &[String]) -> Result<(), InvalidBinding>;
}
