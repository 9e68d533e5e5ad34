//! Integration tests for the /api/auth endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use re_api::app::create_app;

use common::{login_body, register_body, test_context, PASSWORD};

#[actix_web::test]
async fn test_register_returns_created_session() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["accessToken"].as_str().unwrap().split('.').count() == 3);
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
    assert!(body["expiresAt"].is_string());
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert_eq!(body["user"]["fullName"], "Bob Lee");
    assert_eq!(body["user"]["role"], "User");
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(ctx.repo.len().await, 1);
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let first = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

    let second = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("BOB@example.com"))
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ACCOUNT_CONFLICT");
    assert_eq!(ctx.repo.len().await, 1);
}

#[actix_web::test]
async fn test_register_rejects_weak_password_with_field_details() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "bob@example.com",
            "password": "password",
            "confirmPassword": "password",
            "firstName": "Bob",
            "lastName": "Lee"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["password"].is_array());
    assert!(ctx.repo.is_empty().await);
}

#[actix_web::test]
async fn test_login_success_and_generic_failures() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    test::call_service(&app, register).await;

    let ok = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(login_body("Bob@Example.com", PASSWORD))
        .to_request();
    let resp = test::call_service(&app, ok).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["user"]["lastLogin"].is_string());

    let wrong_password = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(login_body("bob@example.com", "Wr0ngPass!"))
        .to_request();
    let resp = test::call_service(&app, wrong_password).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: Value = test::read_body_json(resp).await;

    let unknown_email = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(login_body("nobody@example.com", PASSWORD))
        .to_request();
    let resp = test::call_service(&app, unknown_email).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = test::read_body_json(resp).await;

    assert_eq!(wrong_body["message"], "Invalid email or password");
    assert_eq!(wrong_body["message"], unknown_body["message"]);
    assert_eq!(wrong_body["error"], unknown_body["error"]);
}

#[actix_web::test]
async fn test_login_locks_after_repeated_failures() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    test::call_service(&app, register).await;

    // Default lockout threshold is five consecutive failures
    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(login_body("bob@example.com", "Wr0ngPass!"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    let correct = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(login_body("bob@example.com", PASSWORD))
        .to_request();
    assert_eq!(test::call_service(&app, correct).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_rotates_and_rejects_replay() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, register).await;
    let original = session["refreshToken"].as_str().unwrap().to_string();

    let refresh = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refreshToken": original }))
        .to_request();
    let resp = test::call_service(&app, refresh).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: Value = test::read_body_json(resp).await;
    assert_ne!(rotated["refreshToken"].as_str().unwrap(), original);

    let replay = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refreshToken": original }))
        .to_request();
    let resp = test::call_service(&app, replay).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REFRESH_REJECTED");
}

#[actix_web::test]
async fn test_refresh_requires_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refreshToken": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_revoke_is_terminal() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, register).await;
    let token = session["refreshToken"].as_str().unwrap().to_string();

    let revoke = test::TestRequest::post()
        .uri("/api/auth/revoke")
        .set_json(json!({ "refreshToken": token }))
        .to_request();
    let resp = test::call_service(&app, revoke).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Token revoked successfully");

    let again = test::TestRequest::post()
        .uri("/api/auth/revoke")
        .set_json(json!({ "refreshToken": token }))
        .to_request();
    let resp = test::call_service(&app, again).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REVOKE_FAILED");

    let refresh = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refreshToken": token }))
        .to_request();
    assert_eq!(test::call_service(&app, refresh).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_validate_accepts_bare_and_wrapped_tokens() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("bob@example.com"))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, register).await;
    let access = session["accessToken"].as_str().unwrap().to_string();

    let bare = test::TestRequest::post()
        .uri("/api/auth/validate")
        .set_json(json!(access))
        .to_request();
    let resp = test::call_service(&app, bare).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isValid"], true);

    let wrapped = test::TestRequest::post()
        .uri("/api/auth/validate")
        .set_json(json!({ "token": access }))
        .to_request();
    assert_eq!(test::call_service(&app, wrapped).await.status(), StatusCode::OK);

    let garbage = test::TestRequest::post()
        .uri("/api/auth/validate")
        .set_json(json!({ "token": "not.a.token" }))
        .to_request();
    let resp = test::call_service(&app, garbage).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors)).await;

    let health = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, health).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], true);

    let missing = test::TestRequest::get().uri("/api/auth/nope").to_request();
    let resp = test::call_service(&app, missing).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
