use actix_web::{web, HttpResponse};
use validator::Validate;

use re_core::repositories::UserRepository;

use crate::dto::auth::{AuthResponseDto, RefreshTokenRequest};
use crate::dto::error::validation_error_response;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/refresh
///
/// Exchanges a live refresh token for a new token pair. The presented
/// refresh token stops working once this succeeds.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "base64..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing refresh token
/// - 401 Unauthorized: Unknown, expired or revoked refresh token
/// - 500 Internal Server Error: Credential store failure
pub async fn refresh_token<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(validation_error_response(&errors));
    }

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(AuthResponseDto::from(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
