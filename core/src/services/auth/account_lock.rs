//! Account lock policy for brute force protection
//!
//! Bad passwords are counted on the account record itself. Reaching
//! `max_failed_attempts` sets `lockout_end`; a successful login zeroes the
//! counter and clears the lockout. The first failure after a lockout has
//! expired starts a fresh count.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use re_shared::config::LockoutConfig;
use tracing::{info, warn};

use crate::domain::entities::user::UserAccount;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;

/// Lockout bookkeeping over the credential store
pub struct AccountLockPolicy<U>
where
    U: UserRepository,
{
    /// Store holding the counters
    user_repository: Arc<U>,
    /// Lockout thresholds
    config: LockoutConfig,
    clock: Arc<dyn Clock>,
}

impl<U> AccountLockPolicy<U>
where
    U: UserRepository,
{
    /// Create a new lock policy
    pub fn new(user_repository: Arc<U>, config: LockoutConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repository,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Whether the account is locked right now
    pub fn is_locked(&self, account: &UserAccount) -> bool {
        account.is_locked_out(self.clock.now())
    }

    /// Count a bad password and lock the account at the threshold
    ///
    /// # Returns
    /// * `Ok(Some(until))` - The account is now locked until `until`
    /// * `Ok(None)` - Counted (or lockout disabled), not locked
    /// * `Err(DomainError)` - Store failure
    pub async fn record_failure(
        &self,
        account: &UserAccount,
    ) -> DomainResult<Option<DateTime<Utc>>> {
        if !self.config.enabled {
            return Ok(None);
        }

        if matches!(account.lockout_end, Some(end) if end <= self.clock.now()) {
            self.user_repository
                .reset_failed_login_attempts(account.id)
                .await?;
        }

        let attempts = match self
            .user_repository
            .increment_failed_login_attempts(account.id)
            .await?
        {
            Some(attempts) => attempts,
            None => return Ok(None),
        };

        if attempts < self.config.max_failed_attempts {
            info!(
                user_id = %account.id,
                attempts,
                max_attempts = self.config.max_failed_attempts,
                "Failed login attempt recorded"
            );
            return Ok(None);
        }

        let until = Duration::try_minutes(self.config.lockout_duration_minutes)
            .and_then(|duration| self.clock.now().checked_add_signed(duration))
            .ok_or_else(|| DomainError::Internal {
                message: "Configured lockout duration is out of range".to_string(),
            })?;
        self.user_repository
            .lock_user_account(account.id, until)
            .await?;

        warn!(
            user_id = %account.id,
            attempts,
            locked_until = %until,
            "Account locked due to failed login attempts"
        );

        Ok(Some(until))
    }

    /// Clear failure bookkeeping after a good login and stamp `last_login`
    pub async fn record_success(&self, account: &UserAccount, at: DateTime<Utc>) -> DomainResult<()> {
        if account.failed_login_attempts > 0 || account.lockout_end.is_some() {
            info!(
                user_id = %account.id,
                previous_attempts = account.failed_login_attempts,
                "Resetting failed login attempts"
            );
        }
        self.user_repository
            .reset_failed_login_attempts(account.id)
            .await?;
        self.user_repository.update_last_login(account.id, at).await?;
        Ok(())
    }
}
