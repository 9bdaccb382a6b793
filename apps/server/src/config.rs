//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

/// Tradepost server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file path
    pub database_path: PathBuf,

    /// Sync peer base URL. When set it overrides the `remoteUrl` stored in
    /// settings for the /api/sync/trigger path.
    pub remote_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("TRADEPOST_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TRADEPOST_PORT".to_string()))?,

            database_path: env::var("TRADEPOST_DB_PATH")
                .unwrap_or_else(|_| "./data/tradepost.db".to_string())
                .into(),

            remote_url: env::var("TRADEPOST_REMOTE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        };

        Ok(config)
    }

    /// Socket address string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
