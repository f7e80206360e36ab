//! Token and password configuration

use serde::{Deserialize, Serialize};

use super::{require_env, ConfigError};

/// Default access token lifetime in seconds (24 hours)
const DEFAULT_ACCESS_TOKEN_TTL: i64 = 24 * 3600;

/// Default refresh token lifetime in seconds (30 days)
const DEFAULT_REFRESH_TOKEN_TTL: i64 = 30 * 24 * 3600;

/// Signed-token configuration
///
/// Access and refresh tokens are signed with distinct secrets so that a token
/// presented against the wrong domain fails validation even when well-formed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: i64,
}

fn default_access_ttl() -> i64 {
    DEFAULT_ACCESS_TOKEN_TTL
}

fn default_refresh_ttl() -> i64 {
    DEFAULT_REFRESH_TOKEN_TTL
}

impl TokenConfig {
    /// Create a configuration with the two signing secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Set the access token lifetime in seconds
    pub fn with_access_ttl(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    /// Set the refresh token lifetime in seconds
    pub fn with_refresh_ttl(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }

    /// Load from `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            require_env("JWT_ACCESS_SECRET")?,
            require_env("JWT_REFRESH_SECRET")?,
        ))
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// Server-held secret appended to passwords before hashing (pepper),
    /// distinct from the per-record salt embedded in the hash output
    pub pepper: String,
}

impl PasswordConfig {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Load from `PASSWORD_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(require_env("PASSWORD_SECRET")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = TokenConfig::new("access", "refresh");
        assert_eq!(config.access_ttl_seconds, 24 * 3600);
        assert_eq!(config.refresh_ttl_seconds, 30 * 24 * 3600);
    }

    #[test]
    fn test_builder_overrides() {
        let config = TokenConfig::new("a", "r")
            .with_access_ttl(900)
            .with_refresh_ttl(3600);
        assert_eq!(config.access_ttl_seconds, 900);
        assert_eq!(config.refresh_ttl_seconds, 3600);
    }
}
