//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::AuthTokens;
use crate::domain::{ChatMessage, User};

/// Authentication tokens response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Registration response (includes user and tokens)
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// User profile response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// Build from a persisted user. The id is the hex ObjectId.
    pub fn from_user(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

/// One conversation turn, decrypted for the owner
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessageResponse {
    /// Build from a turn whose content has already been decrypted.
    pub fn from_message(message: ChatMessage) -> Self {
        Self {
            id: message.id.map(|id| id.to_hex()).unwrap_or_default(),
            role: message.role.as_str().to_string(),
            content: message.content,
            created_at: message.created_at,
        }
    }
}

/// Conversation history response
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessageResponse>,
}
