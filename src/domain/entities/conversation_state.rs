//! Conversation state entity and repository trait.
//!
//! Maps to the `conversation_states` collection. Holds the rolling summary
//! handed to the language model so a chat turn does not replay the full
//! message history.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Rolling conversation context for one user.
///
/// Stored in the `conversation_states` collection:
/// - _id: ObjectId
/// - user_id: owner, unique index (one state per user)
/// - summary: rolling summary fed into completion prompts
/// - message_count: turns recorded since the conversation began
/// - updated_at: BSON datetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning user (unique)
    pub user_id: ObjectId,

    /// Rolling summary fed to the language model
    pub summary: String,

    /// Number of turns recorded
    pub message_count: i64,

    /// Last update timestamp
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ConversationState {
    /// Collection name for schema registration.
    pub const COLLECTION: &'static str = "conversation_states";

    /// Create an empty state for a user's first conversation turn.
    pub fn empty(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            summary: String::new(),
            message_count: 0,
            updated_at: Utc::now(),
        }
    }

    /// Fold one exchange into the rolling summary.
    ///
    /// Keeps the summary bounded; older context ages out from the front.
    pub fn record_exchange(&mut self, user_text: &str, assistant_text: &str) {
        const MAX_SUMMARY_CHARS: usize = 4000;

        self.summary
            .push_str(&format!("user: {}\nassistant: {}\n", user_text, assistant_text));
        if self.summary.len() > MAX_SUMMARY_CHARS {
            let cut = self.summary.len() - MAX_SUMMARY_CHARS;
            // Trim at a character boundary at or after the overflow point
            let boundary = (cut..self.summary.len())
                .find(|i| self.summary.is_char_boundary(*i))
                .unwrap_or(0);
            self.summary.drain(..boundary);
        }
        self.message_count += 2;
        self.updated_at = Utc::now();
    }
}

/// Repository trait for conversation state persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationStateRepository: Send + Sync {
    /// Fetch the state for a user, if a conversation exists.
    async fn find_by_user(&self, user_id: ObjectId) -> Result<Option<ConversationState>, AppError>;

    /// Insert or replace the state for the state's user.
    async fn upsert(&self, state: &ConversationState) -> Result<(), AppError>;
}
