//! HTTP-level integration tests for the `/auth` endpoints.
//!
//! Covers registration, login, token refresh with rotation, logout and the
//! bearer-token extractor.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;

fn register_body(username: &str, email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "email": email, "password": password })
}

async fn login(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_then_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        register_body("writer", "Writer@Example.com", "long-enough-pw"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "writer");
    assert_eq!(json["email"], "writer@example.com");
    assert!(json.get("password_hash").is_none(), "hash must never be serialized");

    let tokens = login(app, "writer", "long-enough-pw").await;
    assert!(tokens["access_token"].is_string());
    assert!(tokens["refresh_token"].is_string());
    assert_eq!(tokens["expires_in"], 15 * 60);
    assert_eq!(tokens["user"]["username"], "writer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_username_is_conflict(pool: PgPool) {
    common::create_test_user(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        register_body("taken", "fresh@example.com", "long-enough-pw"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Username is already taken");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_invalid_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = post_json(
        app.clone(),
        "/api/v1/auth/register",
        register_body("writer", "not-an-email", "long-enough-pw"),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_email).await["code"], "VALIDATION_ERROR");

    let short_password = post_json(
        app.clone(),
        "/api/v1/auth/register",
        register_body("writer", "w@example.com", "short"),
    )
    .await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);

    let short_name = post_json(
        app,
        "/api/v1/auth/register",
        register_body("ab", "w@example.com", "long-enough-pw"),
    )
    .await;
    assert_eq!(short_name.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_user_matches_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid username or password");
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_valid_token(pool: PgPool) {
    let user = common::create_test_user(&pool, "me").await;
    let app = common::build_test_app(pool);

    let missing = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(app.clone(), "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let token = common::login_token(app.clone(), "me").await;
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert!(json["last_login_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    common::create_test_user(&pool, "rotator").await;
    let app = common::build_test_app(pool);

    let tokens = login(app.clone(), "rotator", TEST_PASSWORD).await;
    let old_refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], old_refresh.as_str());

    // The old refresh token was revoked by the rotation.
    let reused = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_test_user(&pool, "leaver").await;
    let app = common::build_test_app(pool);

    let tokens = login(app.clone(), "leaver", TEST_PASSWORD).await;
    let access = tokens["access_token"].as_str().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/logout",
        serde_json::json!({}),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": tokens["refresh_token"] });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
