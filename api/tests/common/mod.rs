//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::{json, Value};

use re_api::routes::auth::AppState;
use re_core::services::password::MIN_COST;
use re_core::services::{AuthService, AuthServiceConfig, TokenService, TokenServiceConfig};
use re_infra::InMemoryUserRepository;
use re_shared::config::{CorsConfig, JwtConfig};

pub const PASSWORD: &str = "Passw0rd!";

pub struct TestContext {
    pub state: web::Data<AppState<InMemoryUserRepository>>,
    pub repo: Arc<InMemoryUserRepository>,
    pub cors: CorsConfig,
}

/// App state backed by the in-memory store with a cheap bcrypt cost
pub fn test_context() -> TestContext {
    let jwt = JwtConfig::new("integration-test-secret-at-least-32-bytes!");
    let token_service =
        Arc::new(TokenService::new(TokenServiceConfig::from(&jwt)).expect("token service"));
    let repo = Arc::new(InMemoryUserRepository::new());
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repo),
        token_service,
        AuthServiceConfig::default().with_bcrypt_cost(MIN_COST),
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service)),
        repo,
        cors: CorsConfig::development(),
    }
}

pub fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
        "firstName": "Bob",
        "lastName": "Lee"
    })
}

pub fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}
