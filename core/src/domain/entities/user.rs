//! User account entity as persisted by the credential store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned when registration does not name one
pub const DEFAULT_ROLE: &str = "User";

/// Registered user account
///
/// `refresh_token` holds the SHA-256 digest of the single live refresh
/// token, or an empty string when none has been issued or it was revoked.
/// The password hash and refresh digest never leave the domain layer; use
/// [`UserAccount::profile`] for anything client-facing.
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique identifier, immutable after creation
    pub id: Uuid,

    /// Login identifier, unique case-insensitively
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Role classification ("User", "Admin", "Manager", ...)
    pub role: String,

    /// Ordered capability strings
    pub permissions: Vec<String>,

    /// Inactive accounts behave as "not found" for login and lookup
    pub is_active: bool,

    pub is_email_verified: bool,

    /// Digest of the current refresh token, empty when none
    pub refresh_token: String,

    pub refresh_token_expiry: Option<DateTime<Utc>>,

    /// Consecutive bad-password logins since the last success
    pub failed_login_attempts: u32,

    /// Login is refused while this lies in the future
    pub lockout_end: Option<DateTime<Utc>>,

    pub last_login: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new active, unverified account
    ///
    /// A missing or blank role falls back to [`DEFAULT_ROLE`].
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let role = role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_string(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            permissions: Vec::new(),
            is_active: true,
            is_email_verified: false,
            refresh_token: String::new(),
            refresh_token_expiry: None,
            failed_login_attempts: 0,
            lockout_end: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last" with surrounding whitespace removed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether a lockout is in force at `now`
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        matches!(self.lockout_end, Some(end) if end > now)
    }

    /// Whether the stored refresh token is still usable at `now`
    pub fn has_live_refresh_token(&self, now: DateTime<Utc>) -> bool {
        !self.refresh_token.is_empty()
            && matches!(self.refresh_token_expiry, Some(expiry) if expiry > now)
    }

    /// Case-insensitive email comparison used by every store
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }

    /// Sanitised projection for clients
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("failed_login_attempts", &self.failed_login_attempts)
            .field("lockout_end", &self.lockout_end)
            .field("password_hash", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Client-facing view of an account
///
/// Carries no password hash and no refresh token material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&UserAccount> for UserProfile {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            full_name: account.full_name(),
            role: account.role.clone(),
            permissions: account.permissions.clone(),
            is_active: account.is_active,
            is_email_verified: account.is_email_verified,
            last_login: account.last_login,
            created_at: account.created_at,
        }
    }
}
