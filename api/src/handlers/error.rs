//! Mapping from domain errors to HTTP responses
//!
//! Client errors carry the domain message. Store and internal failures are
//! logged and answered with a generic 500 so no driver detail leaks.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use re_core::errors::{AuthError, DomainError, TokenError};
use re_shared::errors::error_codes;

use crate::dto::error::{ErrorResponse, ErrorResponseExt};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// HTTP-facing error with its status and JSON body
#[derive(Debug, thiserror::Error)]
#[error("{status}: {}", .body.message)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    /// Generic 401 used for every bearer-authentication failure
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            TokenError::TokenInvalid.to_string(),
        )
    }

    pub fn bad_request(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            INTERNAL_MESSAGE,
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match &error {
            DomainError::Auth(AuthError::InvalidCredentials) => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                error.to_string(),
            ),
            DomainError::Auth(AuthError::AccountConflict) => Self::new(
                StatusCode::CONFLICT,
                error_codes::ACCOUNT_CONFLICT,
                error.to_string(),
            ),
            DomainError::Auth(AuthError::RefreshRejected) => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::REFRESH_REJECTED,
                error.to_string(),
            ),
            DomainError::Token(TokenError::TokenInvalid) => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_INVALID,
                error.to_string(),
            ),
            DomainError::ValidationErr(_) => {
                Self::bad_request(error_codes::VALIDATION_ERROR, error.to_string())
            }
            DomainError::NotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                error.to_string(),
            ),
            DomainError::StoreUnavailable { .. }
            | DomainError::Internal { .. }
            | DomainError::Token(TokenError::TokenGenerationFailed) => {
                tracing::error!(error = %error, "Request failed with internal error");
                Self::internal()
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        self.body.to_response(self.status)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use re_core::errors::ValidationError;

    #[test]
    fn test_client_errors_keep_status_and_message() {
        let cases = [
            (DomainError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::AccountConflict), StatusCode::CONFLICT),
            (DomainError::from(AuthError::RefreshRejected), StatusCode::UNAUTHORIZED),
            (DomainError::from(TokenError::TokenInvalid), StatusCode::UNAUTHORIZED),
            (
                DomainError::from(ValidationError::RequiredField {
                    field: "email".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, status) in cases {
            let message = error.to_string();
            let api_error = ApiError::from(error);
            assert_eq!(api_error.status_code(), status);
            assert_eq!(api_error.body.message, message);
        }
    }

    #[test]
    fn test_store_failures_are_generic_500() {
        let error = DomainError::store("connection refused to 10.0.0.5:3306");
        let api_error = ApiError::from(error);

        assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.body.message, INTERNAL_MESSAGE);
        assert!(!api_error.body.message.contains("10.0.0.5"));
    }
}
