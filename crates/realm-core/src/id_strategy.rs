//! Comparison strategies for user and group names

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Equality rule applied to identity names.
///
/// One strategy governs usernames and an independently configured one
/// governs group names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Equality after Unicode lowercasing (`str::to_lowercase`). This is
    /// not full case folding: `STRASSE` and `straße` stay distinct.
    #[default]
    CaseInsensitive,

    /// Exact code point equality
    CaseSensitive,
}

impl IdStrategy {
    /// Normalized form of `id`; two ids are equal under this strategy iff
    /// their keys are equal.
    pub fn key_for<'a>(&self, id: &'a str) -> Cow<'a, str> {
        match self {
            IdStrategy::CaseSensitive => Cow::Borrowed(id),
            IdStrategy::CaseInsensitive => Cow::Owned(id.to_lowercase()),
        }
    }

    pub fn equals(&self, a: &str, b: &str) -> bool {
        match self {
            IdStrategy::CaseSensitive => a == b,
            IdStrategy::CaseInsensitive => self.key_for(a) == self.key_for(b),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::CaseInsensitive => f.write_str("case-insensitive"),
            IdStrategy::CaseSensitive => f.write_str("case-sensitive"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "case-insensitive" | "case_insensitive" | "insensitive" => Ok(IdStrategy::CaseInsensitive),
            "case-sensitive" | "case_sensitive" | "sensitive" => Ok(IdStrategy::CaseSensitive),
            other => Err(ConfigError::Invalid(format!("unknown id strategy: {}", other))),
        }
    }
}
