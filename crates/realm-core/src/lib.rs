//! Core types for the mock security realm: name comparison strategies and
//! realm configuration.

mod config;
mod error;
mod id_strategy;

pub use config::{RealmConfig, RealmConfigBuilder};
pub use error::{ConfigError, Result};
pub use id_strategy::IdStrategy;
