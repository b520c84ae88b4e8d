//! Admin login/logout integration tests.
//!
//! Run with: `cargo test -p glbcdn-api --test admin_test`

mod helpers;

use helpers::{setup_default_app, setup_test_app};
use serde_json::{json, Value};

fn app_with_password() -> helpers::TestApp {
    setup_test_app(|config| {
        config.admin_password = Some("correct horse".to_string());
    })
}

#[tokio::test]
async fn test_login_requires_password_field() {
    let app = app_with_password();

    let response = app.client().post("/api/admin/login").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Password is required");
}

#[tokio::test]
async fn test_login_fails_closed_when_unconfigured() {
    let app = setup_default_app();

    let response = app
        .client()
        .post("/api/admin/login")
        .json(&json!({ "password": "anything" }))
        .await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Admin authentication not configured. Set ADMIN_PASSWORD environment variable."
    );
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = app_with_password();

    let response = app
        .client()
        .post("/api/admin/login")
        .json(&json!({ "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = app_with_password();

    let response = app
        .client()
        .post("/api/admin/login")
        .json(&json!({ "password": "correct horse" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().expect("cookie header");
    assert!(cookie.starts_with("glb-viewer-admin-session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
    // Not production, so no Secure attribute
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_session_status_reflects_login() {
    let app = app_with_password();

    // No cookie yet
    let response = app.client().get("/api/admin/session").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["authenticated"], false);

    let login = app
        .client()
        .post("/api/admin/login")
        .json(&json!({ "password": "correct horse" }))
        .await;
    let set_cookie = login.header("set-cookie");
    let pair = set_cookie
        .to_str()
        .expect("cookie header")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string();

    let response = app
        .client()
        .get("/api/admin/session")
        .add_header("cookie", pair)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn test_session_status_rejects_forged_cookie() {
    let app = app_with_password();

    let response = app
        .client()
        .get("/api/admin/session")
        .add_header("cookie", "glb-viewer-admin-session=not-a-real-token")
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = app_with_password();

    let response = app.client().post("/api/admin/logout").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().expect("cookie header");
    assert!(cookie.starts_with("glb-viewer-admin-session=;"));
    assert!(cookie.contains("Max-Age=0"));
}
