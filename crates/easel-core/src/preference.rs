use std::fmt;

use serde::{Deserialize, Serialize};

/// User-selected provider hint for one scope
///
/// A preference reorders the fallback chain but never replaces it: naming a
/// provider moves it to the front, and the `none` sentinel drops only the
/// user-keyed tier so the cascade can still terminate successfully.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Preference {
    /// Default priority order
    #[default]
    Auto,
    /// Skip every provider that requires a user credential
    SkipUserKeyed,
    /// Try the named provider first, fallback chain otherwise intact
    Provider(String),
}

impl From<String> for Preference {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "auto" => Self::Auto,
            "none" => Self::SkipUserKeyed,
            _ => Self::Provider(value),
        }
    }
}

impl From<Preference> for String {
    fn from(value: Preference) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::SkipUserKeyed => f.write_str("none"),
            Self::Provider(id) => f.write_str(id),
        }
    }
}
