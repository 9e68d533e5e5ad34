//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! validates it through the core [`TokenService`], and injects an
//! [`AuthContext`] into the request. Every failure is answered here with the
//! same 401 body; the wrapped service is never called.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use re_core::{domain::entities::token::Claims, services::token::TokenService};

use crate::handlers::error::ApiError;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the `sub` claim
    pub user_id: Uuid,
    pub email: String,
    /// Full name from the `name` claim
    pub name: String,
    pub role: String,
}

impl AuthContext {
    /// Builds the context from validated claims; `None` when `sub` is not a UUID
    pub fn from_claims(claims: Claims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth_context = authenticate(&req, &self.token_service);

        Box::pin(async move {
            let auth_context = match auth_context {
                Some(context) => context,
                None => {
                    let (request, _) = req.into_parts();
                    let response = ApiError::unauthorized()
                        .error_response()
                        .map_into_right_body();
                    return Ok(ServiceResponse::new(request, response));
                }
            };

            req.extensions_mut().insert(auth_context);
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest, token_service: &TokenService) -> Option<AuthContext> {
    let token = extract_bearer_token(req)?;
    match token_service.validate_access_token(&token) {
        Ok(claims) => AuthContext::from_claims(claims),
        Err(_) => {
            tracing::warn!(path = %req.path(), "Rejected bearer token");
            None
        }
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized().into());

        ready(result)
    }
}
