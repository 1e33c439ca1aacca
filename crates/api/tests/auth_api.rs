//! HTTP-level integration tests for auth endpoints: login, refresh,
//! logout, `/auth/me`, and account lockout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, login_user, post_json, post_json_auth};
use sqlx::PgPool;
use t4w_db::repositories::UserRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = common::create_test_user(&pool, "alice@example.com", "staff").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "alice@example.com", &password).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["role"], "staff");
    // The password hash must never leak.
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "bob@example.com", "staff").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "bob@example.com", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_account(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_deactivated_account(pool: PgPool) {
    let (user, password) = common::create_test_user(&pool, "gone@example.com", "staff").await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "gone@example.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_account_locks_after_repeated_failures(pool: PgPool) {
    let (_user, password) = common::create_test_user(&pool, "locked@example.com", "staff").await;

    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "email": "locked@example.com", "password": "wrong" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is rejected while the account is locked.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "locked@example.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_tokens(pool: PgPool) {
    let (_user, password) = common::create_test_user(&pool, "carol@example.com", "staff").await;

    let login_json = login_user(
        common::build_test_app(pool.clone()),
        "carol@example.com",
        &password,
    )
    .await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let refreshed = body_json(response).await;
    assert!(refreshed["access_token"].is_string());
    assert_ne!(refreshed["refresh_token"], login_json["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_session(pool: PgPool) {
    let (_user, password) = common::create_test_user(&pool, "dave@example.com", "staff").await;

    let login_json = login_user(
        common::build_test_app(pool.clone()),
        "dave@example.com",
        &password,
    )
    .await;
    let access_token = login_json["access_token"].as_str().unwrap();
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        access_token,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (user, token) = common::authed_user(
        &pool,
        common::build_test_app(pool.clone()),
        "erin@example.com",
        "admin",
    )
    .await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["role"], "admin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
