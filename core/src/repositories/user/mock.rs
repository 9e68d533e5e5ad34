//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// `set_unavailable(true)` makes every call fail with `StoreUnavailable`.
/// `set_discard_creates(true)` makes `create` report success without
/// keeping the account.
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
    unavailable: AtomicBool,
    discard_creates: AtomicBool,
    writes: AtomicUsize,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly, bypassing duplicate checks
    pub async fn insert(&self, account: UserAccount) {
        self.users.write().await.insert(account.id, account);
    }

    /// Read an account regardless of its active flag
    pub async fn get(&self, id: Uuid) -> Option<UserAccount> {
        self.users.read().await.get(&id).cloned()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_discard_creates(&self, discard: bool) {
        self.discard_creates.store(discard, Ordering::SeqCst);
    }

    /// Number of successful mutating calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mock store offline".to_string(),
            });
        }
        Ok(())
    }

    async fn modify<F>(&self, id: Uuid, f: F) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut UserAccount) + Send,
    {
        self.check_available()?;
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(account) => {
                f(account);
                account.updated_at = Utc::now();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email_matches(&account.email)) {
            return Err(AuthError::AccountConflict.into());
        }

        if !self.discard_creates.load(Ordering::SeqCst) {
            users.insert(account.id, account.clone());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        self.check_available()?;
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
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.is_active).cloned())
    }

    async fn find_by_refresh_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        self.check_available()?;
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
        self.check_available()?;
        let mut users = self.users.write().await;

        if !users.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(account.id, account.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(account)
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_digest: &str,
        expiry: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let digest = token_digest.to_string();
        self.modify(id, move |u| {
            u.refresh_token = digest;
            u.refresh_token_expiry = Some(expiry);
        })
        .await
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.modify(id, move |u| u.last_login = Some(at)).await
    }

    async fn increment_failed_login_attempts(&self, id: Uuid) -> Result<Option<u32>, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|u| {
            u.failed_login_attempts += 1;
            u.updated_at = Utc::now();
            self.writes.fetch_add(1, Ordering::SeqCst);
            u.failed_login_attempts
        }))
    }

    async fn reset_failed_login_attempts(&self, id: Uuid) -> Result<bool, DomainError> {
        self.modify(id, |u| {
            u.failed_login_attempts = 0;
            u.lockout_end = None;
        })
        .await
    }

    async fn lock_user_account(
        &self,
        id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.modify(id, move |u| u.lockout_end = Some(until)).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}
