//! Error type definitions for authentication, token management and input
//! validation.
//!
//! Messages are deliberately generic: none of them reveals whether an email
//! is registered, whether a password was merely wrong, or why a token failed.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, wrong password, locked or inactive account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration against an email that already exists
    #[error("User with this email already exists")]
    AccountConflict,

    /// Refresh token not found, expired, or account inactive
    #[error("Invalid or expired refresh token")]
    RefreshRejected,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, issuer, audience, expiry or malformed input
    #[error("Token is invalid or expired")]
    TokenInvalid,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },
}
