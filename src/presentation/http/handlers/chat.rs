//! Chat Handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::application::dto::request::ChatRequest;
use crate::application::dto::response::{ChatHistoryResponse, ChatMessageResponse};
use crate::application::services::ChatService;
use crate::infrastructure::llm::GroqClient;
use crate::infrastructure::repositories::{
    MongoChatMessageRepository, MongoConversationStateRepository,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn chat_service(
    state: &AppState,
) -> ChatService<MongoChatMessageRepository, MongoConversationStateRepository, GroqClient> {
    ChatService::new(
        Arc::new(MongoChatMessageRepository::new(&state.db)),
        Arc::new(MongoConversationStateRepository::new(&state.db)),
        state.llm.clone(),
        state.cache.clone(),
        state.cipher.clone(),
    )
}

/// Send a message to the companion and return its reply
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatMessageResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reply = chat_service(&state)
        .send_message(auth.user_id, &body.message)
        .await?;

    Ok(Json(ChatMessageResponse::from_message(reply)))
}

/// Return the caller's conversation history, oldest first
pub async fn get_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let messages = chat_service(&state).history(auth.user_id).await?;

    Ok(Json(ChatHistoryResponse {
        messages: messages
            .into_iter()
            .map(ChatMessageResponse::from_message)
            .collect(),
    }))
}
