//! Greeting Endpoint Tests

use axum::http::StatusCode;

use crate::common::{body_json, TestApp};

/// The root endpoint is the smoke-test surface: fixed greeting, no
/// dependencies
#[tokio::test]
async fn root_returns_the_greeting() {
    let app = TestApp::new().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Welcome to the Kairos API");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/definitely-not-a-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
