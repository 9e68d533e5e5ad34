use actix_web::{web, HttpResponse, ResponseError};
use validator::Validate;

use re_core::repositories::UserRepository;
use re_shared::errors::error_codes;
use re_shared::types::MessageResponse;

use crate::dto::auth::RefreshTokenRequest;
use crate::dto::error::validation_error_response;
use crate::handlers::error::{handle_domain_error, ApiError};

use super::AppState;

/// Handler for POST /api/auth/revoke
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "base64..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Token revoked successfully" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing token, or no account holds it
/// - 500 Internal Server Error: Credential store failure
pub async fn revoke_token<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(validation_error_response(&errors));
    }

    match state.auth_service.revoke_token(&request.refresh_token).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Token revoked successfully")),
        Ok(false) => {
            ApiError::bad_request(error_codes::REVOKE_FAILED, "Failed to revoke token")
                .error_response()
        }
        Err(error) => handle_domain_error(error),
    }
}
