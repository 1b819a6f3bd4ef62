//! Chat message entity and repository trait.
//!
//! Maps to the `chat_messages` collection. Message content is stored as a
//! Fernet token, never as plaintext.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Wire representation used both in storage and in completion requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn of a companion conversation.
///
/// Stored in the `chat_messages` collection:
/// - _id: ObjectId
/// - user_id: owner, indexed together with created_at for history reads
/// - role: "user" or "assistant"
/// - content: Fernet token of the message text
/// - created_at: BSON datetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning user
    pub user_id: ObjectId,

    /// Conversation role of this turn
    pub role: MessageRole,

    /// Encrypted message content (Fernet token)
    pub content: String,

    /// Creation timestamp
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Collection name for schema registration.
    pub const COLLECTION: &'static str = "chat_messages";

    /// Create an unsaved message turn.
    pub fn new(user_id: ObjectId, role: MessageRole, content: String) -> Self {
        Self {
            id: None,
            user_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for chat message persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Insert a message turn and return the assigned id.
    async fn insert(&self, message: &ChatMessage) -> Result<ObjectId, AppError>;

    /// List a user's messages in chronological order, oldest first.
    async fn list_for_user(&self, user_id: ObjectId) -> Result<Vec<ChatMessage>, AppError>;
}
