//! User repository trait defining the credential store contract.
//!
//! The authentication services only read and write accounts through this
//! interface. Implementations live in the infrastructure layer (MySQL and
//! in-memory) and must map every driver failure to
//! `DomainError::StoreUnavailable`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Repository trait for user account persistence operations
///
/// Lookups return `Ok(None)` for blank input instead of touching storage.
/// Field-level updates return `Ok(true)` when a record matched and stamp
/// `updated_at`; there is no optimistic locking, the last write wins.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
/// use uuid::Uuid;
/// use re_core::domain::entities::user::UserAccount;
/// use re_core::errors::DomainError;
/// use re_core::repositories::UserRepository;
///
/// struct NullUserRepository;
///
/// #[async_trait]
/// impl UserRepository for NullUserRepository {
///     async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
///         Ok(account)
///     }
///     async fn find_by_email(&self, _email: &str) -> Result<Option<UserAccount>, DomainError> {
///         Ok(None)
///     }
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<UserAccount>, DomainError> {
///         Ok(None)
///     }
///     async fn find_by_refresh_token(&self, _digest: &str) -> Result<Option<UserAccount>, DomainError> {
///         Ok(None)
///     }
///     async fn update(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
///         Ok(account)
///     }
///     async fn update_refresh_token(&self, _id: Uuid, _digest: &str, _expiry: DateTime<Utc>) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn update_last_login(&self, _id: Uuid, _at: DateTime<Utc>) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn increment_failed_login_attempts(&self, _id: Uuid) -> Result<Option<u32>, DomainError> {
///         Ok(None)
///     }
///     async fn reset_failed_login_attempts(&self, _id: Uuid) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///     async fn lock_user_account(&self, _id: Uuid, _until: DateTime<Utc>) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account
    ///
    /// # Arguments
    /// * `account` - Fully built account; `id`, `created_at` and `updated_at`
    ///   are kept as given
    ///
    /// # Returns
    /// * `Ok(UserAccount)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::AccountConflict))` - Email already
    ///   used by any account, active or not
    /// * `Err(DomainError::StoreUnavailable)` - Storage failure
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError>;

    /// Find an active account by email, ignoring case
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - Active account found
    /// * `Ok(None)` - Blank email, no account, or account inactive
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Find an active account by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - Active account found
    /// * `Ok(None)` - No account, or account inactive
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError>;

    /// Find an account by exact refresh token digest
    ///
    /// No `is_active` filter is applied; callers decide what an inactive
    /// match means. An empty digest never matches, so a revoked token cannot
    /// be found again.
    ///
    /// # Returns
    /// * `Ok(Some(UserAccount))` - Account holding this digest
    /// * `Ok(None)` - Empty digest or no match
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_refresh_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<UserAccount>, DomainError>;

    /// Replace every mutable field of an existing account
    ///
    /// # Returns
    /// * `Ok(UserAccount)` - The stored account
    /// * `Err(DomainError::NotFound)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn update(&self, account: UserAccount) -> Result<UserAccount, DomainError>;

    /// Overwrite the refresh token digest and its expiry
    ///
    /// Any earlier token for this account stops matching.
    ///
    /// # Returns
    /// * `Ok(true)` - Account updated
    /// * `Ok(false)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_digest: &str,
        expiry: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Record a successful login
    ///
    /// # Returns
    /// * `Ok(true)` - Account updated
    /// * `Ok(false)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Add one to the failed-login counter
    ///
    /// # Returns
    /// * `Ok(Some(count))` - Counter value after the increment
    /// * `Ok(None)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn increment_failed_login_attempts(&self, id: Uuid) -> Result<Option<u32>, DomainError>;

    /// Zero the failed-login counter and clear any lockout
    ///
    /// # Returns
    /// * `Ok(true)` - Account updated
    /// * `Ok(false)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn reset_failed_login_attempts(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Refuse logins until `until`
    ///
    /// # Returns
    /// * `Ok(true)` - Account updated
    /// * `Ok(false)` - No account with this id
    /// * `Err(DomainError)` - Storage failure
    async fn lock_user_account(
        &self,
        id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
