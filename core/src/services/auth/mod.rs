//! Authentication service module
//!
//! This module orchestrates the session lifecycle:
//! - Login with lockout bookkeeping
//! - Registration
//! - Refresh token rotation and revocation
//! - Current-user lookup and token liveness checks

mod account_lock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use account_lock::AccountLockPolicy;
pub use config::AuthServiceConfig;
pub use service::{AuthService, LoginAttempt, NewAccount};
