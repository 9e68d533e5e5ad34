//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserAccount;

/// Claims structure for JWT payload
///
/// The claim set is fixed: subject, email, full name and role, plus the
/// registered time and binding claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    /// Full name ("First Last")
    pub name: String,

    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates access token claims for an account
    ///
    /// # Arguments
    ///
    /// * `account` - The account the token is issued to
    /// * `issued_at` - Issuance instant (from the service clock)
    /// * `lifetime` - How long the token stays valid
    /// * `issuer` / `audience` - Binding claims checked on validation
    pub fn for_account(
        account: &UserAccount,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let expiry = issued_at + lifetime;

        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            name: account.full_name(),
            role: account.role.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the subject claim
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Expired once `now` reaches `exp`; no leeway
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Not usable before `nbf`
    pub fn is_premature_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() < self.nbf
    }
}

/// Signed access token together with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Freshly minted credentials for one session
///
/// `refresh_token` is the raw value handed to the client; only its digest is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount::new("bob@example.com", "hash", "Bob", "Lee", None, Utc::now())
    }

    #[test]
    fn test_access_token_claims() {
        let account = account();
        let now = Utc::now();
        let claims = Claims::for_account(&account, now, Duration::minutes(60), "iss", "aud");

        assert_eq!(claims.user_id(), Some(account.id));
        assert_eq!(claims.email, "bob@example.com");
        assert_eq!(claims.name, "Bob Lee");
        assert_eq!(claims.role, "User");
        assert_eq!(claims.iss, "iss");
        assert_eq!(claims.aud, "aud");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired_at(now));
        assert!(!claims.is_premature_at(now));
    }

    #[test]
    fn test_expiry_has_no_leeway() {
        let now = Utc::now();
        let claims = Claims::for_account(&account(), now, Duration::minutes(1), "iss", "aud");

        assert!(!claims.is_expired_at(now + Duration::seconds(59)));
        assert!(claims.is_expired_at(now + Duration::seconds(60)));
        assert!(claims.is_expired_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_unique_jti() {
        let account = account();
        let now = Utc::now();
        let first = Claims::for_account(&account, now, Duration::minutes(1), "iss", "aud");
        let second = Claims::for_account(&account, now, Duration::minutes(1), "iss", "aud");

        assert_ne!(first.jti, second.jti);
        assert_eq!(first.sub, second.sub);
    }

    #[test]
    fn test_invalid_subject() {
        let mut claims = Claims::for_account(&account(), Utc::now(), Duration::minutes(1), "i", "a");
        claims.sub = "not-a-uuid".to_string();
        assert_eq!(claims.user_id(), None);
    }
}
