//! End-to-end tests for the login / admin / profile surface
//!
//! Drives the real router with `tower::ServiceExt::oneshot`, carrying the
//! `token` cookie between requests by hand.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use roleguard::{
    auth::{AuthState, InMemoryCredentialStore, JwtHandler},
    create_router,
};
use tower::ServiceExt;

const SECRET: &str = "secret-key";

fn app() -> Router {
    create_router(AuthState::new(
        Arc::new(InMemoryCredentialStore::builtin()),
        Arc::new(JwtHandler::new(SECRET)),
    ))
}

async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

async fn post_login(app: &Router, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

/// Log in and return the `token` cookie value.
async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password }).to_string();
    let response = post_login(app, &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii cookie")
        .to_string();
    let pair = set_cookie.split(';').next().unwrap();
    pair.strip_prefix("token=").expect("token cookie").to_string()
}

async fn get_with_token(app: &Router, path: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }
    let request = builder.body(Body::empty()).expect("request");
    app.clone().oneshot(request).await.expect("response")
}

#[tokio::test]
async fn test_admin_login_reaches_admin_area() {
    let app = app();
    let token = login_token(&app, "aditira", "password1").await;

    let response = get_with_token(&app, "/admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, "Welcome Admin aditira!");
}

#[tokio::test]
async fn test_admin_can_view_profile() {
    let app = app();
    let token = login_token(&app, "aditira", "password1").await;

    let response = get_with_token(&app, "/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, "Welcome aditira!");
}

#[tokio::test]
async fn test_student_denied_admin_but_sees_profile() {
    let app = app();
    let token = login_token(&app, "dito", "password2").await;

    let admin = get_with_token(&app, "/admin", Some(&token)).await;
    assert_eq!(admin.status(), StatusCode::UNAUTHORIZED);

    let profile = get_with_token(&app, "/profile", Some(&token)).await;
    assert_eq!(profile.status(), StatusCode::OK);
    assert_eq!(read_body(profile).await, "Welcome dito!");
}

#[tokio::test]
async fn test_login_sets_expiring_cookie_with_empty_body() {
    let app = app();
    let before = Utc::now();
    let response = post_login(&app, r#"{"username":"dito","password":"password2"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Expires="));
    assert!(read_body(response).await.is_empty());

    let token = set_cookie
        .split(';')
        .next()
        .and_then(|p| p.strip_prefix("token="))
        .unwrap();
    let claims = JwtHandler::new(SECRET)
        .validate(token, Utc::now())
        .expect("valid token");
    assert_eq!(claims.username, "dito");
    assert_eq!(claims.role, "student");

    let ttl = claims.expires_at() - before;
    assert!(ttl <= Duration::minutes(5) + Duration::seconds(1));
    assert!(ttl >= Duration::minutes(5) - Duration::seconds(2));
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized_without_cookie() {
    let app = app();

    for body in [
        r#"{"username":"aditira","password":"password2"}"#,
        r#"{"username":"ghost","password":"password1"}"#,
        r#"{"username":"dito"}"#,
        r#"{}"#,
    ] {
        let response = post_login(&app, body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", body);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_non_json_login_body_is_bad_request() {
    let app = app();

    for body in ["", "not json", "{\"username\":", "username=aditira"] {
        let response = post_login(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", body);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_login_does_not_require_json_content_type() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from(r#"{"username":"aditira","password":"password1"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = app();

    for path in ["/profile", "/admin"] {
        let response = get_with_token(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
async fn test_garbage_token_is_bad_request() {
    let app = app();

    for path in ["/profile", "/admin"] {
        let response = get_with_token(&app, path, Some("garbage")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", path);
    }
}

#[tokio::test]
async fn test_token_from_other_key_is_unauthorized() {
    let app = app();
    let (token, _) = JwtHandler::new("someone-elses-key")
        .issue("aditira", "admin", Utc::now())
        .unwrap();

    let response = get_with_token(&app, "/admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let app = app();
    let token = login_token(&app, "dito", "password2").await;

    let mut bytes = token.into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let response = get_with_token(&app, "/profile", Some(&tampered)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = app();
    let (token, _) = JwtHandler::new(SECRET)
        .issue("aditira", "admin", Utc::now() - Duration::minutes(6))
        .unwrap();

    for path in ["/profile", "/admin"] {
        let response = get_with_token(&app, path, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
async fn test_file_backed_store_plugs_into_router() {
    let store = InMemoryCredentialStore::from_toml_str(
        r#"
        [users.carol]
        password = "hunter2"
        role = "admin"
        "#,
    )
    .unwrap();
    let app = create_router(AuthState::new(
        Arc::new(store),
        Arc::new(JwtHandler::new(SECRET)),
    ));

    let token = login_token(&app, "carol", "hunter2").await;
    let response = get_with_token(&app, "/admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, "Welcome Admin carol!");

    let response = post_login(&app, r#"{"username":"aditira","password":"password1"}"#).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_token_without_expiry_is_unauthorized() {
    let app = app();
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &serde_json::json!({ "username": "aditira", "role": "admin" }),
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    for path in ["/profile", "/admin"] {
        let response = get_with_token(&app, path, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}
