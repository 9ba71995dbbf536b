//! Configuration for the mock security realm

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::id_strategy::IdStrategy;

/// Configuration for a mock security realm.
///
/// Fixed at construction; the realm never writes it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RealmConfig {
    /// Roster text, one identity per line
    #[serde(default)]
    pub data: String,

    /// Simulated latency per lookup; zero or negative disables it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_millis: Option<i64>,

    /// Jitter the delay by roughly its square root
    #[serde(default)]
    pub random_delay: bool,

    /// Comparison strategy for usernames
    #[serde(default)]
    pub user_id_strategy: IdStrategy,

    /// Comparison strategy for group names
    #[serde(default)]
    pub group_id_strategy: IdStrategy,
}

impl RealmConfig {
    /// Create a configuration for the given roster with every other
    /// setting at its default
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Create a builder for more flexible construction
    pub fn builder() -> RealmConfigBuilder {
        RealmConfigBuilder::new()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RealmConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from `MOCK_REALM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data = match (lookup("MOCK_REALM_DATA"), lookup("MOCK_REALM_DATA_FILE")) {
            (Some(inline), _) => inline.replace("\\n", "\n"),
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => String::new(),
        };

        let delay_millis = lookup("MOCK_REALM_DELAY_MILLIS")
            .map(|v| {
                v.trim().parse::<i64>().map_err(|_| {
                    ConfigError::Invalid(format!("MOCK_REALM_DELAY_MILLIS is not a number: {}", v))
                })
            })
            .transpose()?;

        let random_delay = match lookup("MOCK_REALM_RANDOM_DELAY") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| ConfigError::Invalid(format!("MOCK_REALM_RANDOM_DELAY is not a boolean: {}", v)))?,
            None => false,
        };

        let user_id_strategy = lookup("MOCK_REALM_USER_ID_STRATEGY")
            .map(|v| v.parse::<IdStrategy>())
            .transpose()?
            .unwrap_or_default();
        let group_id_strategy = lookup("MOCK_REALM_GROUP_ID_STRATEGY")
            .map(|v| v.parse::<IdStrategy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            data,
            delay_millis,
            random_delay,
            user_id_strategy,
            group_id_strategy,
        })
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Effective delay, `None` when the configured value disables it
    pub fn delay(&self) -> Option<Duration> {
        match self.delay_millis {
            Some(ms) if ms > 0 => Some(Duration::from_millis(ms as u64)),
            _ => None,
        }
    }

    pub fn is_random_delay(&self) -> bool {
        self.random_delay
    }

    pub fn user_id_strategy(&self) -> IdStrategy {
        self.user_id_strategy
    }

    pub fn group_id_strategy(&self) -> IdStrategy {
        self.group_id_strategy
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct RealmConfigBuilder {
    config: RealmConfig,
}

impl RealmConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the roster text
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.config.data = data.into();
        self
    }

    /// Set the simulated delay in milliseconds
    pub fn with_delay_millis(mut self, delay_millis: i64) -> Self {
        self.config.delay_millis = Some(delay_millis);
        self
    }

    /// Toggle jitter on the simulated delay
    pub fn with_random_delay(mut self, random_delay: bool) -> Self {
        self.config.random_delay = random_delay;
        self
    }

    pub fn with_user_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.config.user_id_strategy = strategy;
        self
    }

    pub fn with_group_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.config.group_id_strategy = strategy;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> RealmConfig {
        self.config
    }
}
