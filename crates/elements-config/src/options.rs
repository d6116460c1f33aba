//! Enumerated settings forwarded to the Elements web component.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::ConfigError;

/// Page layout of the Elements component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Sidebar,
    Stacked,
}

impl Layout {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Stacked => "stacked",
        }
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sidebar" => Ok(Self::Sidebar),
            "stacked" => Ok(Self::Stacked),
            _ => Err(ConfigError::invalid("layout", s)),
        }
    }
}

/// How the component navigates between operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouterMode {
    #[default]
    History,
    Hash,
    Memory,
    Static,
}

impl RouterMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Hash => "hash",
            Self::Memory => "memory",
            Self::Static => "static",
        }
    }
}

impl FromStr for RouterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" => Ok(Self::History),
            "hash" => Ok(Self::Hash),
            "memory" => Ok(Self::Memory),
            "static" => Ok(Self::Static),
            _ => Err(ConfigError::invalid("router", s)),
        }
    }
}

/// Credentials policy used by the "Try It" panel for outgoing calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsPolicy {
    #[default]
    Omit,
    Include,
    SameOrigin,
}

impl CredentialsPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Omit => "omit",
            Self::Include => "include",
            Self::SameOrigin => "same-origin",
        }
    }
}

impl FromStr for CredentialsPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "include" => Ok(Self::Include),
            "same-origin" => Ok(Self::SameOrigin),
            _ => Err(ConfigError::invalid("credentials-policy", s)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Layout, RouterMode, CredentialsPolicy);

/// Delimiters around variable names inside the OpenAPI document.
///
/// Configurable so that documents which already use `{{ }}` for their own
/// purposes can pick something that does not collide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_owned(),
            close: "}}".to_owned(),
        }
    }
}

impl FromStr for Delimiters {
    type Err = ConfigError;

    /// Parse `"OPEN CLOSE"`, e.g. `"[[ ]]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => Ok(Self {
                open: open.to_owned(),
                close: close.to_owned(),
            }),
            _ => Err(ConfigError::invalid("delimiters", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_str() {
        assert_eq!("sidebar".parse::<Layout>().unwrap(), Layout::Sidebar);
        assert_eq!("Stacked".parse::<Layout>().unwrap(), Layout::Stacked);
        assert!("grid".parse::<Layout>().is_err());
    }

    #[test]
    fn test_router_round_trips_through_as_str() {
        for mode in [
            RouterMode::History,
            RouterMode::Hash,
            RouterMode::Memory,
            RouterMode::Static,
        ] {
            assert_eq!(mode.as_str().parse::<RouterMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_credentials_policy_same_origin() {
        let policy: CredentialsPolicy = "same-origin".parse().unwrap();
        assert_eq!(policy, CredentialsPolicy::SameOrigin);
        assert_eq!(policy.to_string(), "same-origin");
    }

    #[test]
    fn test_invalid_value_names_field() {
        let err = "everything".parse::<CredentialsPolicy>().unwrap_err();
        assert!(err.to_string().contains("credentials-policy"));
    }

    #[test]
    fn test_delimiters_parse() {
        let delimiters: Delimiters = "[[ ]]".parse().unwrap();
        assert_eq!(delimiters.open, "[[");
        assert_eq!(delimiters.close, "]]");
        assert!("[[".parse::<Delimiters>().is_err());
        assert!("a b c".parse::<Delimiters>().is_err());
    }
}
