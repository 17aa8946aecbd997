pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const VERSION_NAME: &str = "version";

#[cfg(windows)]
pub(crate) const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub(crate) const PATH_LIST_SEPARATOR: char = ':';

pub(crate) const DEFAULT_VERSION: &str = "0.0.0";
