use actix_web::{web, HttpResponse, ResponseError};

use re_core::repositories::UserRepository;

use crate::dto::auth::UserDto;
use crate::handlers::error::{handle_domain_error, ApiError};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/auth/profile
///
/// Requires `Authorization: Bearer {access_token}`. An account that was
/// deactivated or removed after the token was issued yields 401.
pub async fn profile<U>(state: web::Data<AppState<U>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state
        .auth_service
        .get_current_user(&auth.user_id.to_string())
        .await
    {
        Ok(Some(profile)) => HttpResponse::Ok().json(UserDto::from(profile)),
        Ok(None) => ApiError::unauthorized().error_response(),
        Err(error) => handle_domain_error(error),
    }
}
