//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Database configuration for the MySQL credential store
///
/// `url == None` selects the in-memory store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Apply embedded migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connect_timeout: env_or("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            run_migrations: env_or("DATABASE_RUN_MIGRATIONS", defaults.run_migrations)?,
            ..defaults
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Whether a persistent database is configured
    pub fn is_persistent(&self) -> bool {
        self.url.is_some()
    }
}
