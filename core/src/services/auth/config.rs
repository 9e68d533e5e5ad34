//! Configuration for the authentication service

use re_shared::config::{AuthConfig, LockoutConfig};

use crate::services::password::DEFAULT_COST;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Failed-login lockout settings
    pub lockout: LockoutConfig,
    /// bcrypt cost used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            lockout: LockoutConfig::default(),
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            lockout: auth.lockout.clone(),
            ..Default::default()
        }
    }
}

impl AuthServiceConfig {
    /// Override the bcrypt cost
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
