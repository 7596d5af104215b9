//! Named string sources that configuration is read from.

use std::collections::HashMap;

/// A lookup of named string values, such as the process environment.
pub trait ConfigSource {
    /// Returns the value for `name`, or `None` when it is unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Returns the value for `name` unless it is unset or empty.
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

/// Reads values from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl ConfigSource for HashMap<&str, &str> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).map(|value| value.to_string())
    }
}
