//! Chat Message Repository Implementation
//!
//! MongoDB implementation of conversation turn persistence. History reads
//! are served by the compound (user_id, created_at) index registered at
//! startup.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};

use crate::domain::{ChatMessage, ChatMessageRepository};
use crate::shared::error::AppError;

/// MongoDB chat message repository implementation.
#[derive(Clone)]
pub struct MongoChatMessageRepository {
    collection: Collection<ChatMessage>,
}

impl MongoChatMessageRepository {
    /// Create a repository bound to the `chat_messages` collection.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(ChatMessage::COLLECTION),
        }
    }
}

#[async_trait]
impl ChatMessageRepository for MongoChatMessageRepository {
    async fn insert(&self, message: &ChatMessage) -> Result<ObjectId, AppError> {
        let result = self.collection.insert_one(message).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Internal("inserted message id was not an ObjectId".into()))
    }

    async fn list_for_user(&self, user_id: ObjectId) -> Result<Vec<ChatMessage>, AppError> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1 })
            .await?;

        let messages = cursor.try_collect().await?;
        Ok(messages)
    }
}
