use std::marker::PhantomData;

use crate::api::capture::*;
use crate::binder::InvalidBinding;
use crate::convert::{Builtin, Convert, Converter};
use crate::model::{Arity, ValueKind};
use crate::prelude::Collectable;
use crate::validate::{ValidationChain, Validator};

type Setter<C, T> = Box<dyn Fn(&mut C, T) + Send + Sync>;

/// A field that binds a single value (or none, for switches and `Option` targets).
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::Scalar;
///
/// #[derive(Default)]
/// struct Serve {
///     port: u16,
/// }
///
/// let field = Scalar::new(|serve: &mut Serve, port| serve.port = port)
///     .validate(|port: &u16| if *port >= 1024 { Ok(()) } else { Err("must be unprivileged".to_string()) });
/// ```
pub struct Scalar<C, T> {
    setter: Setter<C, T>,
    converter: Box<dyn Converter<T>>,
    validators: ValidationChain<T>,
}

impl<C, T: Convert + 'static> Scalar<C, T> {
    /// Create a scalar field, converted by the built-in conversion table.
    pub fn new(setter: impl Fn(&mut C, T) + Send + Sync + 'static) -> Self {
        Self::converted(setter, Builtin::default())
    }
}

impl<C, T: 'static> Scalar<C, T> {
    /// Create a scalar field with an explicit converter.
    ///
    /// ### Example
    /// ```
    /// # use bindarg_core as bindarg;
    /// use bindarg::{convert, Scalar};
    /// use std::net::Ipv4Addr;
    ///
    /// #[derive(Default)]
    /// struct Ping {
    ///     address: Option<Ipv4Addr>,
    /// }
    ///
    /// let field = Scalar::converted(
    ///     |ping: &mut Ping, address| ping.address = Some(address),
    ///     convert::from_str::<Ipv4Addr>(),
    /// );
    /// ```
    pub fn converted(
        setter: impl Fn(&mut C, T) + Send + Sync + 'static,
        converter: impl Converter<T> + 'static,
    ) -> Self {
        Self {
            setter: Box::new(setter),
            converter: Box::new(converter),
            validators: ValidationChain::default(),
        }
    }

    /// Attach a validator, run against the converted value.
    /// Repeat to attach several; every one runs.
    pub fn validate(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(validator);
        self
    }
}

impl<C, T> Bindable<C> for Scalar<C, T> {
    fn arity(&self) -> Arity {
        Arity::Scalar
    }

    fn kind(&self) -> ValueKind {
        self.converter.kind()
    }

    fn bind(&self, instance: &mut C, values: &[String]) -> Result<(), InvalidBinding> {
        let raw = match values {
            [] => None,
            [value] => Some(value.as_str()),
            _ => {
                return Err(InvalidBinding::Arity {
                    provided: values.len(),
                })
            }
        };
        let value = self
            .converter
            .convert(raw)
            .map_err(InvalidBinding::Conversion)?;
        self.validators
            .run(&value)
            .map_err(InvalidBinding::Validation)?;
        (self.setter)(instance, value);
        Ok(())
    }
}

/// A field that binds any number of values, collected into `S`.
///
/// Every value is converted, then the whole collection is validated.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::Sequence;
/// use std::collections::HashSet;
///
/// #[derive(Default)]
/// struct Tag {
///     labels: HashSet<String>,
/// }
///
/// let field = Sequence::new(|tag: &mut Tag, labels| tag.labels = labels)
///     .validate(|labels: &HashSet<String>| if labels.len() <= 3 { Ok(()) } else { Err("at most 3 labels".to_string()) });
/// ```
pub struct Sequence<C, S, T> {
    setter: Setter<C, S>,
    converter: Box<dyn Converter<T>>,
    validators: ValidationChain<S>,
    _phantom: PhantomData<fn() -> T>,
}

impl<C, S, T> Sequence<C, S, T>
where
    S: Collectable<T> + Default + 'static,
    T: Convert + 'static,
{
    /// Create a sequence field, each element converted by the built-in conversion table.
    pub fn new(setter: impl Fn(&mut C, S) + Send + Sync + 'static) -> Self {
        Self::converted(setter, Builtin::default())
    }
}

impl<C, S, T> Sequence<C, S, T>
where
    S: Collectable<T> + Default + 'static,
    T: 'static,
{
    /// Create a sequence field with an explicit converter for its elements.
    pub fn converted(
        setter: impl Fn(&mut C, S) + Send + Sync + 'static,
        converter: impl Converter<T> + 'static,
    ) -> Self {
        Self {
            setter: Box::new(setter),
            converter: Box::new(converter),
            validators: ValidationChain::default(),
            _phantom: PhantomData,
        }
    }

    /// Attach a validator, run against the collected values.
    /// Repeat to attach several; every one runs.
    pub fn validate(mut self, validator: impl Validator<S> + 'static) -> Self {
        self.validators.push(validator);
        self
    }
}

impl<C, S, T> Bindable<C> for Sequence<C, S, T>
where
    S: Collectable<T> + Default,
{
    fn arity(&self) -> Arity {
        Arity::Sequence
    }

    fn kind(&self) -> ValueKind {
        self.converter.kind()
    }

    fn bind(&self, instance: &mut C, values: &[String]) -> Result<(), InvalidBinding> {
        let mut collection = S::default();

        for value in values {
            let item = self
                .converter
                .convert(Some(value.as_str()))
                .map_err(InvalidBinding::Conversion)?;
            collection.add(item);
        }

        self.validators
            .run(&collection)
            .map_err(InvalidBinding::Validation)?;
        (self.setter)(instance, collection);
        Ok(())
    }
}
