//! Main authentication service implementation

use std::sync::Arc;

use chrono::Duration;
use re_shared::validation::mask_email;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::user::{UserAccount, UserProfile};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;
use crate::services::password::{hash_password, verify_password};
use crate::services::token::TokenService;

use super::account_lock::AccountLockPolicy;
use super::config::AuthServiceConfig;

/// Credentials presented at login
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
    /// Extends the refresh token lifetime to the configured days
    pub remember_me: bool,
}

/// Registration input, already validated by the route layer
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    /// Defaults to "User" when absent
    pub role: Option<String>,
}

/// Authentication service for managing the complete session lifecycle
///
/// The service is the only writer of authentication fields on an account.
/// It keeps nothing between calls: every operation re-reads the account and
/// writes back individual fields, so concurrent logins or refreshes for the
/// same account race and the last refresh token written wins.
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Token service for JWT and refresh token handling
    token_service: Arc<TokenService>,
    /// Failed-login bookkeeping
    lock_policy: AccountLockPolicy<U>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Credential store
    /// * `token_service` - Service for JWT token management; its clock is
    ///   shared with the lockout policy
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        let lock_policy = AccountLockPolicy::new(
            Arc::clone(&user_repository),
            config.lockout.clone(),
            Arc::clone(token_service.clock()),
        );

        Self {
            user_repository,
            token_service,
            lock_policy,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    pub fn user_repository(&self) -> &Arc<U> {
        &self.user_repository
    }

    /// Authenticate with email and password
    ///
    /// This method:
    /// 1. Looks up the active account by email (case-insensitive)
    /// 2. Refuses locked accounts without touching the failure counter
    /// 3. Verifies the password; a mismatch is counted and may lock the account
    /// 4. Resets the failure counter and records `last_login`
    /// 5. Issues a token pair, overwriting any previous refresh token
    ///
    /// Every refusal is `AuthError::InvalidCredentials`, whatever the cause.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Tokens, access expiry and profile
    /// * `Err(DomainError)` - Invalid credentials or store failure
    pub async fn login(&self, attempt: LoginAttempt) -> DomainResult<AuthResponse> {
        let masked_email = mask_email(&attempt.email);

        let account = match self.user_repository.find_by_email(&attempt.email).await? {
            Some(account) => account,
            None => {
                warn!(email = %masked_email, "Login failed: no active account");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if self.lock_policy.is_locked(&account) {
            warn!(user_id = %account.id, "Login refused: account locked");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !verify_password(&attempt.password, &account.password_hash) {
            self.lock_policy.record_failure(&account).await?;
            warn!(user_id = %account.id, "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let now = self.clock().now();
        self.lock_policy.record_success(&account, now).await?;

        let mut account = account;
        account.failed_login_attempts = 0;
        account.lockout_end = None;
        account.last_login = Some(now);

        let response = self
            .issue_session(
                &account,
                attempt.remember_me,
                AuthError::InvalidCredentials.into(),
            )
            .await?;

        info!(
            user_id = %account.id,
            email = %masked_email,
            remember_me = attempt.remember_me,
            "User logged in"
        );

        Ok(response)
    }

    /// Register a new account and sign it in
    ///
    /// Password complexity and name lengths are enforced by the caller;
    /// only presence and the confirmation match are re-checked here.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Tokens for the new account
    /// * `Err(DomainError::Auth(AuthError::AccountConflict))` - Email taken
    /// * `Err(DomainError)` - Validation or store failure
    pub async fn register(&self, new_account: NewAccount) -> DomainResult<AuthResponse> {
        if new_account.email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if new_account.password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }
        if new_account.password != new_account.confirm_password {
            return Err(ValidationError::InvalidFormat {
                field: "confirmPassword".to_string(),
            }
            .into());
        }

        let masked_email = mask_email(&new_account.email);

        if self
            .user_repository
            .find_by_email(&new_account.email)
            .await?
            .is_some()
        {
            warn!(email = %masked_email, "Registration refused: email already registered");
            return Err(AuthError::AccountConflict.into());
        }

        let password_hash = hash_password(&new_account.password, self.config.bcrypt_cost)?;
        let account = UserAccount::new(
            new_account.email,
            password_hash,
            new_account.first_name,
            new_account.last_name,
            new_account.role,
            self.clock().now(),
        );

        let account = self.user_repository.create(account).await.map_err(|e| {
            if matches!(e, DomainError::Auth(AuthError::AccountConflict)) {
                warn!(email = %masked_email, "Registration refused: email held by inactive account");
            }
            e
        })?;

        let response = self
            .issue_session(
                &account,
                false,
                DomainError::Internal {
                    message: "Registered account missing from store".to_string(),
                },
            )
            .await?;

        info!(
            user_id = %account.id,
            email = %masked_email,
            role = %account.role,
            "User registered"
        );

        Ok(response)
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token is invalidated by overwrite. The rotated refresh
    /// token always gets the 24 hour lifetime, even when the login used
    /// remember-me.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New tokens and profile
    /// * `Err(DomainError::Auth(AuthError::RefreshRejected))` - Unknown,
    ///   expired or revoked token, or inactive account
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        if refresh_token.is_empty() {
            return Err(AuthError::RefreshRejected.into());
        }

        let digest = TokenService::hash_refresh_token(refresh_token);
        let account = match self.user_repository.find_by_refresh_token(&digest).await? {
            Some(account) => account,
            None => {
                warn!("Refresh rejected: token not found");
                return Err(AuthError::RefreshRejected.into());
            }
        };

        if !account.is_active {
            warn!(user_id = %account.id, "Refresh rejected: account inactive");
            return Err(AuthError::RefreshRejected.into());
        }

        if !account.has_live_refresh_token(self.clock().now()) {
            warn!(user_id = %account.id, "Refresh rejected: token expired");
            return Err(AuthError::RefreshRejected.into());
        }

        let response = self
            .issue_session(&account, false, AuthError::RefreshRejected.into())
            .await?;

        info!(user_id = %account.id, "Refresh token rotated");

        Ok(response)
    }

    /// Revoke a refresh token
    ///
    /// Finds the account by token regardless of its active flag, empties the
    /// stored token and backdates its expiry by a day.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Token revoked
    /// * `Ok(false)` - No account holds this token (including already revoked)
    pub async fn revoke_token(&self, refresh_token: &str) -> DomainResult<bool> {
        if refresh_token.is_empty() {
            return Ok(false);
        }

        let digest = TokenService::hash_refresh_token(refresh_token);
        let account = match self.user_repository.find_by_refresh_token(&digest).await? {
            Some(account) => account,
            None => {
                debug!("Revoke found no matching token");
                return Ok(false);
            }
        };

        let expired = self.clock().now() - Duration::days(1);
        let revoked = self
            .user_repository
            .update_refresh_token(account.id, "", expired)
            .await?;

        if revoked {
            info!(user_id = %account.id, "Refresh token revoked");
        }

        Ok(revoked)
    }

    /// Profile of an active account
    ///
    /// An identifier that is not a UUID yields `Ok(None)`.
    pub async fn get_current_user(&self, user_id: &str) -> DomainResult<Option<UserProfile>> {
        let id = match Uuid::parse_str(user_id.trim()) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };

        Ok(self
            .user_repository
            .find_by_id(id)
            .await?
            .map(|account| account.profile()))
    }

    /// Check an access token and that its account is still active
    ///
    /// Unlike [`TokenService::validate_access_token`] this performs a store
    /// lookup. Store failures propagate; every token problem is `Ok(false)`.
    pub async fn validate_token(&self, token: &str) -> DomainResult<bool> {
        let claims = match self.token_service.validate_access_token(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(false),
        };

        let user_id = match claims.user_id() {
            Some(id) => id,
            None => return Ok(false),
        };

        let exists = self.user_repository.find_by_id(user_id).await?.is_some();
        if !exists {
            debug!(user_id = %user_id, "Valid token for missing or inactive account");
        }

        Ok(exists)
    }

    fn clock(&self) -> &Arc<dyn Clock> {
        self.token_service.clock()
    }

    /// Mint a token pair and persist the refresh digest on the account
    ///
    /// `on_missing` is returned when the account disappeared between the
    /// read and this write.
    async fn issue_session(
        &self,
        account: &UserAccount,
        remember_me: bool,
        on_missing: DomainError,
    ) -> DomainResult<AuthResponse> {
        let tokens = self.token_service.issue_token_pair(account, remember_me)?;
        let digest = TokenService::hash_refresh_token(&tokens.refresh_token);

        let stored = self
            .user_repository
            .update_refresh_token(account.id, &digest, tokens.refresh_token_expires_at)
            .await?;

        if !stored {
            warn!(user_id = %account.id, "Account vanished before refresh token was stored");
            return Err(on_missing);
        }

        Ok(AuthResponse::from_token_pair(tokens, account))
    }
}
