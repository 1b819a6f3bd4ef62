//! User Handlers

use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::application::dto::request::UpdateProfileRequest;
use crate::application::dto::response::UserResponse;
use crate::domain::UserRepository;
use crate::infrastructure::repositories::MongoUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Get the authenticated user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let users = MongoUserRepository::new(&state.db);
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from_user(user)))
}

/// Update the authenticated user's profile
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let users = MongoUserRepository::new(&state.db);
    users
        .update_display_name(auth.user_id, &body.display_name)
        .await?;

    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse::from_user(user)))
}
