//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Overall deadline for one checkout operation
    pub checkout_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Loads through an injectable variable lookup so tests don't
    /// depend on the process environment.
    fn load_from(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: var("DATABASE_PATH")
                .unwrap_or_else(|| "toko.db".to_string())
                .into(),

            checkout_timeout: var("CHECKOUT_TIMEOUT_MS")
                .unwrap_or_else(|| "10000".to_string())
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue("CHECKOUT_TIMEOUT_MS".to_string()))?,
        };

        if config.checkout_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("CHECKOUT_TIMEOUT_MS".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::load_from(|_| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("toko.db"));
        assert_eq!(config.checkout_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::load_from(|key| match key {
            "PORT" => Some("9000".to_string()),
            "CHECKOUT_TIMEOUT_MS" => Some("250".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.checkout_timeout, Duration::from_millis(250));
        // Unset variables still fall back.
        assert_eq!(config.database_path, PathBuf::from("toko.db"));
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let err = ServerConfig::load_from(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref field) if field == "PORT"));
    }

    #[test]
    fn zero_checkout_timeout_is_rejected() {
        let err = ServerConfig::load_from(|key| match key {
            "CHECKOUT_TIMEOUT_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
