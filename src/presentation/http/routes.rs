//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Smoke-test surface
        .route("/", get(root))
        // Route groups
        .nest("/auth", auth_routes())
        .nest("/chat", chat_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .with_state(state)
}

/// Greeting endpoint used as a liveness smoke test
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Kairos API" }))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
}

/// Chat routes (protected)
fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(handlers::chat::get_history).post(handlers::chat::send_message),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// User routes (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::user::get_me).patch(handlers::user::update_me),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
