use std::collections::HashMap;

use crate::constant::PATH_LIST_SEPARATOR;

/// A read-only snapshot of environment variables, consulted for options absent from the Cli.
///
/// Names are case-sensitive.
///
/// ### Example
/// ```
/// # use bindarg_core as bindarg;
/// use bindarg::EnvironmentVariables;
///
/// let environment: EnvironmentVariables = [("NAME", "value")].into_iter().collect();
/// assert_eq!(environment.get("NAME"), Some("value"));
/// assert_eq!(environment.get("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
    variables: HashMap<String, String>,
}

impl EnvironmentVariables {
    /// Snapshot the variables of the current process.
    /// Variables whose name or value is not valid unicode are left out.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// The value of the variable, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// The number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the snapshot holds no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Split a variable's value into the values of a sequence, discarding blank segments.
pub(super) fn split_list(value: &str) -> Vec<String> {
    value
        .split(PATH_LIST_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .map(str::to_string)
        .collect()
}
