//! Authentication API Tests
//!
//! Exercises the request paths that resolve before any database access:
//! body validation and bearer-token rejection.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/auth/register",
            r#"{"email":"not-an-email","display_name":"A","password":"longenough"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/auth/register",
            r#"{"email":"a@b.c","display_name":"A","password":"short"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.get("/chat/messages").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/users/me")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    // Clearing marks the session modified, so an (empty) cookie is re-issued
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("session="));
}
