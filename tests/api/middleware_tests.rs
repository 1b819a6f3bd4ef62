//! Middleware Stack Tests
//!
//! The middleware order is part of the application contract: the CORS layer
//! wraps the session layer, which wraps router dispatch (including the JWT
//! middleware on protected routes). A preflight from a disallowed origin is
//! answered by the CORS layer before anything inside it runs.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use crate::common::TestApp;

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn disallowed_origin_preflight_gets_no_grant_and_no_session() {
    let app = TestApp::new().await;

    let response = app.send(preflight("/auth/login", "https://evil.example")).await;

    // Answered by the CORS layer: no grant headers, no session cookie, and
    // nothing inside the layer ran
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn preflight_is_answered_before_the_auth_middleware() {
    let app = TestApp::new().await;

    // Without the CORS layer short-circuit this OPTIONS would fall through
    // to the router and the JWT middleware
    let response = app
        .send(preflight("/chat/messages", "http://localhost:3000"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn allowed_origin_is_granted_with_credentials() {
    let app = TestApp::new().await;

    let response = app
        .send(preflight("/auth/login", "http://localhost:3000"))
        .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn simple_request_from_allowed_origin_carries_the_grant() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
