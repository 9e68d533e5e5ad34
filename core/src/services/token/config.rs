//! Configuration for the token service

use jsonwebtoken::Algorithm;
use re_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family)
    pub algorithm: Algorithm,
    /// Issuer embedded in and required from every token
    pub issuer: String,
    /// Audience embedded in and required from every token
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days for remember-me sessions
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_expiry_minutes: jwt.access_token_expiry_minutes,
            refresh_token_expiry_days: jwt.refresh_token_expiry_days,
        }
    }
}
