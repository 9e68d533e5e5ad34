//! Credential store selection
//!
//! `AuthService` is generic over its repository, so the runtime choice
//! between MySQL and memory is made by this enum, which delegates every
//! call to the selected backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use re_core::domain::entities::user::UserAccount;
use re_core::errors::DomainError;
use re_core::repositories::UserRepository;
use re_shared::config::DatabaseConfig;

use super::connection::DatabasePool;
use super::memory::InMemoryUserRepository;
use super::mysql::MySqlUserRepository;
use crate::InfrastructureError;

/// Configured credential store
pub enum CredentialStore {
    MySql(MySqlUserRepository),
    Memory(InMemoryUserRepository),
}

impl CredentialStore {
    /// Build the store described by `config`
    ///
    /// With a database URL this opens the pool and optionally applies
    /// migrations; the returned pool is kept by the caller for shutdown.
    /// Without one the process-local store is used.
    pub async fn connect(
        config: &DatabaseConfig,
    ) -> Result<(Self, Option<DatabasePool>), InfrastructureError> {
        if !config.is_persistent() {
            tracing::warn!("DATABASE_URL not set, using in-memory credential store");
            return Ok((Self::Memory(InMemoryUserRepository::new()), None));
        }

        let pool = DatabasePool::new(config).await?;
        if config.run_migrations {
            pool.run_migrations().await?;
        }
        tracing::info!("{}", pool.get_statistics());

        let repository = MySqlUserRepository::new(pool.get_pool().clone());
        Ok((Self::MySql(repository), Some(pool)))
    }

    /// Short backend name for logs and health output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<InMemoryUserRepository> for CredentialStore {
    fn from(repository: InMemoryUserRepository) -> Self {
        Self::Memory(repository)
    }
}

impl From<MySqlUserRepository> for CredentialStore {
    fn from(repository: MySqlUserRepository) -> Self {
        Self::MySql(repository)
    }
}

macro_rules! delegate {
    ($self:ident, $repo:ident => $call:expr) => {
        match $self {
            CredentialStore::MySql($repo) => $call,
            CredentialStore::Memory($repo) => $call,
        }
    };
}

#[async_trait]
impl UserRepository for CredentialStore {
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        delegate!(self, r => r.create(account).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        delegate!(self, r => r.find_by_email(email).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError> {
        delegate!(self, r => r.find_by_id(id).await)
    }

    async fn find_by_refresh_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        delegate!(self, r => r.find_by_refresh_token(token_digest).await)
    }

    async fn update(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        delegate!(self, r => r.update(account).await)
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_digest: &str,
        expiry: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        delegate!(self, r => r.update_refresh_token(id, token_digest, expiry).await)
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        delegate!(self, r => r.update_last_login(id, at).await)
    }

    async fn increment_failed_login_attempts(&self, id: Uuid) -> Result<Option<u32>, DomainError> {
        delegate!(self, r => r.increment_failed_login_attempts(id).await)
    }

    async fn reset_failed_login_attempts(&self, id: Uuid) -> Result<bool, DomainError> {
        delegate!(self, r => r.reset_failed_login_attempts(id).await)
    }

    async fn lock_user_account(
        &self,
        id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        delegate!(self, r => r.lock_user_account(id, until).await)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        delegate!(self, r => r.ping().await)
    }
}
