//! Authentication response value object for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{UserAccount, UserProfile};

/// Result of a successful login, registration or refresh
///
/// Contains:
/// - the signed access token and its expiry
/// - the raw refresh token (the store only keeps its digest)
/// - a sanitised profile of the account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Access token expiration instant
    pub expires_at: DateTime<Utc>,

    /// Profile of the authenticated account
    pub user: UserProfile,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and the account
    /// it was issued to
    pub fn from_token_pair(tokens: TokenPair, account: &UserAccount) -> Self {
        Self {
            access_token: tokens.access_token.token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.access_token.expires_at,
            user: account.profile(),
        }
    }
}
