//! Authentication route handlers
//!
//! This module contains all endpoints mounted under `/api/auth`:
//! - Login and registration
//! - Refresh token rotation and revocation
//! - Profile lookup for the bearer token's account
//! - Token validation

pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod revoke;
pub mod validate;

use std::sync::Arc;

use re_core::repositories::UserRepository;
use re_core::services::auth::AuthService;

pub use login::login;
pub use profile::profile;
pub use refresh::refresh_token;
pub use register::register;
pub use revoke::revoke_token;
pub use validate::validate_token;

/// Application state shared by the auth handlers
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
}

impl<U> AppState<U>
where
    U: UserRepository,
{
    pub fn new(auth_service: Arc<AuthService<U>>) -> Self {
        Self { auth_service }
    }
}
