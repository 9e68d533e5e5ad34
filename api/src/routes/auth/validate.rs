use actix_web::{web, HttpResponse, ResponseError};

use re_core::repositories::UserRepository;
use re_shared::errors::error_codes;

use crate::dto::auth::{ValidateTokenRequest, ValidateTokenResponse};
use crate::handlers::error::{handle_domain_error, ApiError};

use super::AppState;

/// Handler for POST /api/auth/validate
///
/// Accepts the access token either as a bare JSON string or as
/// `{ "token": "..." }`.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Token is valid", "isValid": true }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Token invalid, expired, or its account is gone
/// - 500 Internal Server Error: Credential store failure
pub async fn validate_token<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<ValidateTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.auth_service.validate_token(request.token()).await {
        Ok(true) => HttpResponse::Ok().json(ValidateTokenResponse {
            message: "Token is valid".to_string(),
            is_valid: true,
        }),
        Ok(false) => {
            ApiError::bad_request(error_codes::TOKEN_INVALID, "Token is invalid or expired")
                .error_response()
        }
        Err(error) => handle_domain_error(error),
    }
}
