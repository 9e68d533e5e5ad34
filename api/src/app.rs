//! Application factory
//!
//! Builds the actix-web `App` with CORS, request tracing, JSON error
//! handling and the `/api/auth` routes.

use std::sync::Arc;

use actix_web::{
    error::JsonPayloadError, web, App, HttpRequest, HttpResponse, ResponseError,
};
use tracing_actix_web::TracingLogger;

use re_core::repositories::UserRepository;
use re_shared::config::CorsConfig;
use re_shared::errors::error_codes;
use re_shared::types::HealthResponse;

use crate::handlers::error::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    login, profile, refresh_token, register, revoke_token, validate_token, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let jwt_auth = JwtAuth::new(Arc::clone(app_state.auth_service.token_service()));

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Middleware order: CORS answers preflights before tracing records them
        .wrap(TracingLogger::default())
        .wrap(create_cors(cors_config))
        .route("/health", web::get().to(health_check::<U>))
        .service(
            web::scope("/api/auth")
                .route("/login", web::post().to(login::<U>))
                .route("/register", web::post().to(register::<U>))
                .route("/refresh", web::post().to(refresh_token::<U>))
                .route("/revoke", web::post().to(revoke_token::<U>))
                .route("/validate", web::post().to(validate_token::<U>))
                .service(
                    web::resource("/profile")
                        .route(web::get().to(profile::<U>))
                        .wrap(jwt_auth),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Returns 503 when the credential store does not answer.
async fn health_check<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let store_healthy = match state.auth_service.user_repository().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            false
        }
    };

    let response = HealthResponse::new(env!("CARGO_PKG_VERSION"), store_healthy);
    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Malformed or mistyped JSON bodies become 400 with the standard error body
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected request body");
    ApiError::bad_request(error_codes::BAD_REQUEST, "Request body is not valid JSON for this endpoint")
        .into()
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ApiError::new(
        actix_web::http::StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .error_response()
}
