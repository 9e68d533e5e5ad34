//! In-memory implementation of the UserRepository trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use re_core::domain::entities::user::UserAccount;
use re_core::errors::{AuthError, DomainError};
use re_core::repositories::UserRepository;

/// In-memory implementation of UserRepository
///
/// Clones share the same underlying map. Every operation takes the lock once,
/// so check-then-insert in `create` is atomic.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, active or not
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Apply `f` to the account with `id`, stamping `updated_at`
    async fn with_account<T, F>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut UserAccount) -> T + Send,
    {
        let mut users = self.users.write().await;
        users.get_mut(&id).map(|account| {
            let out = f(account);
            account.updated_at = Utc::now();
            out
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email_matches(&account.email)) {
            return Err(AuthError::AccountConflict.into());
        }

        users.insert(account.id, account.clone());
        tracing::debug!(user_id = %account.id, "Stored user account in memory");
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        if email.trim().is_empty() {
            return Ok(None);
        }
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_active && u.email_matches(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.is_active).cloned())
    }

    async fn find_by_refresh_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        if token_digest.is_empty() {
            return Ok(None);
        }
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.refresh_token == token_digest)
            .cloned())
    }

    async fn update(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&account.id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_digest: &str,
        expiry: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let digest = token_digest.to_string();
        Ok(self
            .with_account(id, move |u| {
                u.refresh_token = digest;
                u.refresh_token_expiry = Some(expiry);
            })
            .await
            .is_some())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        Ok(self
            .with_account(id, move |u| u.last_login = Some(at))
            .await
            .is_some())
    }

    async fn increment_failed_login_attempts(&self, id: Uuid) -> Result<Option<u32>, DomainError> {
        Ok(self
            .with_account(id, |u| {
                u.failed_login_attempts = u.failed_login_attempts.saturating_add(1);
                u.failed_login_attempts
            })
            .await)
    }

    async fn reset_failed_login_attempts(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .with_account(id, |u| {
                u.failed_login_attempts = 0;
                u.lockout_end = None;
            })
            .await
            .is_some())
    }

    async fn lock_user_account(
        &self,
        id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .with_account(id, move |u| u.lockout_end = Some(until))
            .await
            .is_some())
    }
}
