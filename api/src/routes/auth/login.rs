use actix_web::{web, HttpResponse};
use validator::Validate;

use re_core::repositories::UserRepository;

use crate::dto::auth::{AuthResponseDto, LoginRequest};
use crate::dto::error::validation_error_response;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "bob@example.com", "password": "Passw0rd!", "rememberMe": false }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "base64...",
///     "expiresAt": "2024-01-01T13:00:00Z",
///     "user": { "id": "...", "email": "bob@example.com", "fullName": "Bob Lee", ... }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or short password
/// - 401 Unauthorized: Unknown email, wrong password, locked or inactive account
/// - 500 Internal Server Error: Credential store failure
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(validation_error_response(&errors));
    }

    match state.auth_service.login(request.into()).await {
        Ok(auth_response) => HttpResponse::Ok().json(AuthResponseDto::from(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
