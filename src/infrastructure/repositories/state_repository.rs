//! Conversation State Repository Implementation
//!
//! MongoDB implementation of the rolling conversation summary store.
//! One document per user, enforced by the unique user_id index.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::domain::{ConversationState, ConversationStateRepository};
use crate::shared::error::AppError;

/// MongoDB conversation state repository implementation.
#[derive(Clone)]
pub struct MongoConversationStateRepository {
    collection: Collection<ConversationState>,
}

impl MongoConversationStateRepository {
    /// Create a repository bound to the `conversation_states` collection.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(ConversationState::COLLECTION),
        }
    }
}

#[async_trait]
impl ConversationStateRepository for MongoConversationStateRepository {
    async fn find_by_user(
        &self,
        user_id: ObjectId,
    ) -> Result<Option<ConversationState>, AppError> {
        let state = self.collection.find_one(doc! { "user_id": user_id }).await?;
        Ok(state)
    }

    async fn upsert(&self, state: &ConversationState) -> Result<(), AppError> {
        self.collection
            .replace_one(doc! { "user_id": state.user_id }, state)
            .upsert(true)
            .await?;
        Ok(())
    }
}
