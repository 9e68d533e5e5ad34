use actix_web::{web, HttpResponse};

use re_core::repositories::UserRepository;

use crate::dto::auth::{AuthResponseDto, RegisterRequest};
use crate::dto::error::validation_error_response;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/auth/register
///
/// Creates the account and signs it in.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "bob@example.com",
///     "password": "Passw0rd!",
///     "confirmPassword": "Passw0rd!",
///     "firstName": "Bob",
///     "lastName": "Lee",
///     "role": "User"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// Same body as login.
///
/// ## Errors
/// - 400 Bad Request: Field validation failure
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Credential store failure
pub async fn register<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate_all() {
        return HttpResponse::BadRequest().json(validation_error_response(&errors));
    }

    match state.auth_service.register(request.into()).await {
        Ok(auth_response) => HttpResponse::Created().json(AuthResponseDto::from(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
