//! Authentication configuration: JWT signing and account lockout

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError, Environment, MIN_PRODUCTION_SECRET_LEN};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Upper bound for the access token lifetime (one year)
pub const MAX_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 525_600;

/// Upper bound for the remember-me refresh lifetime (ten years)
pub const MAX_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 3_650;

/// Upper bound for a single lockout (one year)
pub const MAX_LOCKOUT_DURATION_MINUTES: i64 = 525_600;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HS256 signing
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days, applied to remember-me logins
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: String::from("RealEstateAPI"),
            audience: String::from("RealEstateClient"),
            access_token_expiry_minutes: 60,
            refresh_token_expiry_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            access_token_expiry_minutes: env_or(
                "JWT_EXPIRATION_MINUTES",
                defaults.access_token_expiry_minutes,
            )?,
            refresh_token_expiry_days: env_or(
                "JWT_REFRESH_EXPIRATION_DAYS",
                defaults.refresh_token_expiry_days,
            )?,
        })
    }

    /// Set issuer and audience
    pub fn with_issuer_audience(
        mut self,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub(crate) fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if environment.is_production()
            && (self.secret.len() < MIN_PRODUCTION_SECRET_LEN || self.is_using_default_secret())
        {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!(
                    "production requires a custom secret of at least {} bytes",
                    MIN_PRODUCTION_SECRET_LEN
                ),
            });
        }
        check_range(
            "JWT_EXPIRATION_MINUTES",
            self.access_token_expiry_minutes,
            MAX_ACCESS_TOKEN_EXPIRY_MINUTES,
        )?;
        check_range(
            "JWT_REFRESH_EXPIRATION_DAYS",
            self.refresh_token_expiry_days,
            MAX_REFRESH_TOKEN_EXPIRY_DAYS,
        )?;
        Ok(())
    }
}

/// Failed-login lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Whether bad passwords are counted at all
    pub enabled: bool,

    /// Consecutive failures that trigger a lockout
    pub max_failed_attempts: u32,

    /// How long a lockout lasts, in minutes
    pub lockout_duration_minutes: i64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_failed_attempts: 5,
            lockout_duration_minutes: 15,
        }
    }
}

impl LockoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            enabled: env_or("LOCKOUT_ENABLED", defaults.enabled)?,
            max_failed_attempts: env_or(
                "LOCKOUT_MAX_FAILED_ATTEMPTS",
                defaults.max_failed_attempts,
            )?,
            lockout_duration_minutes: env_or(
                "LOCKOUT_DURATION_MINUTES",
                defaults.lockout_duration_minutes,
            )?,
        })
    }

    /// Configuration that never counts failures
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.max_failed_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "LOCKOUT_MAX_FAILED_ATTEMPTS",
                reason: "must be at least 1 when lockout is enabled".to_string(),
            });
        }
        check_range(
            "LOCKOUT_DURATION_MINUTES",
            self.lockout_duration_minutes,
            MAX_LOCKOUT_DURATION_MINUTES,
        )
    }
}

fn check_range(key: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::Invalid {
            key,
            reason: "must be positive".to_string(),
        });
    }
    if value > max {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("must not exceed {}", max),
        });
    }
    Ok(())
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Lockout configuration
    #[serde(default)]
    pub lockout: LockoutConfig,
}

impl AuthConfig {
    /// Load authentication configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            lockout: LockoutConfig::from_env()?,
        })
    }
}
