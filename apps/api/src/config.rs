//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! fixed defaults, so an unconfigured process always listens on port 8080
//! and stores data in `./database.db`.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use stockroom_db::DbConfig;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default SQLite file.
pub const DEFAULT_DATABASE_PATH: &str = "./database.db";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 5,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let config = AppConfig {
            host: lookup("STOCKROOM_HOST").unwrap_or(defaults.host),

            port: match lookup("STOCKROOM_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("STOCKROOM_PORT".to_string()))?,
                None => defaults.port,
            },

            database_path: lookup("STOCKROOM_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: match lookup("STOCKROOM_DB_MAX_CONNECTIONS") {
                Some(raw) => raw.parse().map_err(|_| {
                    ConfigError::InvalidValue("STOCKROOM_DB_MAX_CONNECTIONS".to_string())
                })?,
                None => defaults.max_connections,
            },

            log_filter: lookup("STOCKROOM_LOG").unwrap_or(defaults.log_filter),
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOCKROOM_HOST".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
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
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("./database.db"));
        assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STOCKROOM_HOST", "127.0.0.1"),
            ("STOCKROOM_PORT", "9090"),
            ("STOCKROOM_DATABASE_PATH", "/tmp/x.db"),
            ("STOCKROOM_DB_MAX_CONNECTIONS", "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.db_config().max_connections, 8);
        assert_eq!(config.db_config().database_path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("STOCKROOM_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STOCKROOM_PORT");

        assert!(AppConfig::from_lookup(lookup_from(&[("STOCKROOM_DB_MAX_CONNECTIONS", "0")])).is_err());

        let config = AppConfig::from_lookup(lookup_from(&[("STOCKROOM_HOST", "not a host")])).unwrap();
        assert!(config.bind_address().is_err());
    }
}
