//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors returned by every service and repository operation
#[derive(Error, Debug)]
pub enum DomainError {
    /// Any persistence failure; surfaced without retry
    #[error("Credential store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Build a `StoreUnavailable` from any driver error
    pub fn store(error: impl std::fmt::Display) -> Self {
        DomainError::StoreUnavailable {
            message: error.to_string(),
        }
    }

    /// Expected negative outcomes that map to 4xx at the boundary
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(_)
                | DomainError::Token(TokenError::TokenInvalid)
                | DomainError::ValidationErr(_)
                | DomainError::NotFound { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
