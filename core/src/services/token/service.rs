//! Main token service implementation

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{AccessToken, Claims, TokenPair};
use crate::domain::entities::user::UserAccount;
use crate::errors::{DomainError, TokenError};
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenServiceConfig;

/// Refresh tokens carry 512 bits of entropy
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// Refresh lifetime for sessions without remember-me, and for every rotation
pub const SHORT_REFRESH_LIFETIME_HOURS: i64 = 24;

/// Service for issuing and validating credentials
///
/// Every method is synchronous and free of I/O. Time is read from the
/// injected [`Clock`].
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a new token service using the system clock
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or error if the configuration is unusable
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new token service reading time from `clock`
    pub fn with_clock(
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Internal {
                message: format!("Unsupported signing algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry and not-before are checked against the injected clock
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Access token lifetime
    pub fn access_token_lifetime(&self) -> Result<Duration, DomainError> {
        Duration::try_minutes(self.config.access_token_expiry_minutes)
            .ok_or_else(|| lifetime_out_of_range("access token"))
    }

    /// Refresh token lifetime for a session
    ///
    /// `remember_me` sessions get the configured number of days; everything
    /// else gets 24 hours.
    pub fn refresh_token_lifetime(&self, remember_me: bool) -> Result<Duration, DomainError> {
        if remember_me {
            Duration::try_days(self.config.refresh_token_expiry_days)
                .ok_or_else(|| lifetime_out_of_range("refresh token"))
        } else {
            Ok(Duration::hours(SHORT_REFRESH_LIFETIME_HOURS))
        }
    }

    fn expiry_after(
        &self,
        from: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<DateTime<Utc>, DomainError> {
        from.checked_add_signed(lifetime)
            .ok_or_else(|| lifetime_out_of_range("token expiry"))
    }

    /// Issues a signed access token for an account
    ///
    /// # Returns
    ///
    /// * `Ok(AccessToken)` - Token and its expiry (now + configured minutes)
    /// * `Err(DomainError)` - Signing failed
    pub fn issue_access_token(&self, account: &UserAccount) -> Result<AccessToken, DomainError> {
        let issued_at = self.clock.now();
        let lifetime = self.access_token_lifetime()?;
        let expires_at = self.expiry_after(issued_at, lifetime)?;
        let claims = Claims::for_account(
            account,
            issued_at,
            lifetime,
            &self.config.issuer,
            &self.config.audience,
        );
        let token = self.encode_jwt(&claims)?;

        Ok(AccessToken { token, expires_at })
    }

    /// Generates an opaque refresh token
    ///
    /// 64 bytes from the operating system CSPRNG, base64 encoded.
    pub fn issue_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Issues an access token and a refresh token together
    ///
    /// # Arguments
    ///
    /// * `account` - The account the pair is issued to
    /// * `remember_me` - Selects the refresh lifetime
    pub fn issue_token_pair(
        &self,
        account: &UserAccount,
        remember_me: bool,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(account)?;
        let refresh_token = self.issue_refresh_token();
        let refresh_token_expires_at =
            self.expiry_after(self.clock.now(), self.refresh_token_lifetime(remember_me)?)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_token_expires_at,
        })
    }

    /// Validates an access token and returns its claims
    ///
    /// Checks signature, algorithm, issuer, audience, not-before and expiry
    /// with zero clock skew. Every failure is reported as
    /// `TokenError::TokenInvalid`.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let invalid = || DomainError::Token(TokenError::TokenInvalid);

        let token_data = decode::<Claims>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Access token rejected");
                invalid()
            })?;

        let claims = token_data.claims;
        let now = self.clock.now();
        if claims.is_expired_at(now) || claims.is_premature_at(now) {
            debug!("Access token outside its validity window");
            return Err(invalid());
        }
        if claims.user_id().is_none() {
            return Err(invalid());
        }

        Ok(claims)
    }

    /// User id from a valid access token
    pub fn user_id_from_token(&self, token: &str) -> Option<Uuid> {
        self.validate_access_token(token)
            .ok()
            .and_then(|claims| claims.user_id())
    }

    /// Expiry claim of a token, read without verifying the signature
    pub fn token_expiration(&self, token: &str) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims::<&str>(&[]);

        decode::<Claims>(token.trim(), &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .and_then(|data| data.claims.expires_at())
    }

    /// Whether a token is past its expiry; unreadable tokens count as expired
    pub fn is_token_expired(&self, token: &str) -> bool {
        match self.token_expiration(token) {
            Some(expires_at) => expires_at <= self.clock.now(),
            None => true,
        }
    }

    /// SHA-256 digest under which a refresh token is stored
    pub fn hash_refresh_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

fn lifetime_out_of_range(what: &str) -> DomainError {
    DomainError::Internal {
        message: format!("Configured {} lifetime is out of range", what),
    }
}
