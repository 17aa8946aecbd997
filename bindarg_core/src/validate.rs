/// A check applied to an input's converted value.
///
/// Any `Fn(&T) -> Result<(), String>` closure is a validator.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::ValidationChain;
///
/// let chain = ValidationChain::default()
///     .with(|value: &u32| if *value > 0 { Ok(()) } else { Err("must be positive".to_string()) })
///     .with(|value: &u32| if value % 2 == 0 { Ok(()) } else { Err("must be even".to_string()) });
///
/// assert_eq!(chain.run(&4), Ok(()));
/// assert_eq!(chain.run(&3), Err(vec!["must be even".to_string()]));
/// ```
pub trait Validator<T>: Send + Sync {
    /// Validate the value, describing the failure if there is one.
    fn validate(&self, value: &T) -> Result<(), String>;
}

impl<T, F> Validator<T> for F
where
    F: Fn(&T) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        self(value)
    }
}

/// The validators attached to one input, in declaration order.
pub struct ValidationChain<T> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T> Default for ValidationChain<T> {
    fn default() -> Self {
        Self {
            validators: Vec::default(),
        }
    }
}

impl<T> ValidationChain<T> {
    /// Append a validator to the chain.
    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.push(validator);
        self
    }

    pub(crate) fn push(&mut self, validator: impl Validator<T> + 'static) {
        self.validators.push(Box::new(validator));
    }

    /// The number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator against the value.
    /// Failures do not short-circuit; all of them are returned together.
    pub fn run(&self, value: &T) -> Result<(), Vec<String>> {
        let failures: Vec<String> = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(value).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

impl<T> std::fmt::Debug for ValidationChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationChain")
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NonEmpty;

    impl Validator<String> for NonEmpty {
        fn validate(&self, value: &String) -> Result<(), String> {
            if value.is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn empty_chain() {
        let chain: ValidationChain<u32> = ValidationChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.run(&0), Ok(()));
    }

    #[test]
    fn struct_validator() {
        let chain = ValidationChain::default().with(NonEmpty);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.run(&"abc".to_string()), Ok(()));
        assert_eq!(
            chain.run(&String::default()),
            Err(vec!["must not be empty".to_string()])
        );
    }

    #[test]
    fn no_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let first = calls.clone();
        let second = calls.clone();
        let chain = ValidationChain::default()
            .with(move |_: &i32| {
                first.fetch_add(1, Ordering::SeqCst);
                Err("first".to_string())
            })
            .with(move |_: &i32| {
                second.fetch_add(1, Ordering::SeqCst);
                Err("second".to_string())
            });

        assert_eq!(
            chain.run(&1),
            Err(vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
