//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::json;
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{RegisterResponse, TokenResponse, UserResponse};
use crate::application::services::{AuthError, AuthService};
use crate::infrastructure::repositories::MongoUserRepository;
use crate::presentation::middleware::Session;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthService<MongoUserRepository> {
    let users = Arc::new(MongoUserRepository::new(&state.db));
    AuthService::new(users, state.settings.clone())
}

fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::EmailExists => AppError::Conflict("Email already exists".into()),
        AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, tokens) = auth_service(&state)
        .register(&body.email, &body.display_name, &body.password)
        .await
        .map_err(map_auth_error)?;

    let response = RegisterResponse {
        user: UserResponse::from_user(user),
        access_token: tokens.access_token,
        expires_in: tokens.expires_in,
        token_type: tokens.token_type,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, tokens) = auth_service(&state)
        .authenticate(&body.email, &body.password)
        .await
        .map_err(map_auth_error)?;

    // Remember the login in the cookie session alongside the bearer token
    if let Some(id) = user.id {
        session.insert("user_id", json!(id.to_hex()));
    }

    Ok(Json(tokens.into()))
}

/// Logout: drop the cookie session
pub async fn logout(Extension(session): Extension<Session>) -> StatusCode {
    session.clear();
    StatusCode::NO_CONTENT
}
