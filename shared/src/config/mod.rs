//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and account lockout configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Every struct is immutable once built. `AppConfig::from_env()` is the only
//! place the process environment is read; downstream services receive the
//! values through their constructors.

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, LockoutConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Minimum signing secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Errors raised while validating configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the per-environment defaults; a variable
    /// that is set but does not parse is an error. Call
    /// [`AppConfig::validate`] before using the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }
        logging.format = env_or("LOG_FORMAT", logging.format)?;

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            cors: if environment.is_development() {
                CorsConfig::development()
            } else {
                CorsConfig::from_env()
            },
            logging,
        })
    }

    /// Check cross-field constraints that defaults alone cannot guarantee
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.jwt.validate(self.environment)?;
        self.auth.lockout.validate()?;
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                key: "SERVER_PORT",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default` when unset
pub(crate) fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            reason: format!("cannot parse {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}
