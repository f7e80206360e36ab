//! Configuration module for the Goodfood auth service
//!
//! Each collaborator gets its own config struct, deserializable from files and
//! constructible from environment variables. Secrets are carried as opaque
//! strings; a missing mandatory secret at boot is a fatal startup failure.

pub mod auth;
pub mod broker;
pub mod database;

pub use auth::{PasswordConfig, TokenConfig};
pub use broker::BrokerConfig;
pub use database::DatabaseConfig;

use thiserror::Error;

/// Fatal configuration errors raised during startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVariable { name: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Read a mandatory environment variable, failing startup when absent or empty
pub(crate) fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable {
            name: name.to_string(),
        }),
    }
}
