//! Environment variable snapshot.

use std::collections::HashMap;

/// An explicit snapshot of environment variables.
///
/// Resolution reads variables through this value instead of the process
/// environment so that it stays a pure function of its inputs.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Capture the current process environment (non-UTF-8 entries are skipped).
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// First non-empty value among `names`, in order.
    #[must_use]
    pub fn first(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.vars.get(*name))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    /// Raw lookup of a single variable (empty values included).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Boolean lookup: `1`, `true`, `yes` and `on` are true, anything else is false.
    #[must_use]
    pub fn flag(&self, names: &[&str]) -> Option<bool> {
        self.first(names).map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
