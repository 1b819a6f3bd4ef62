//! User Repository Implementation
//!
//! MongoDB implementation of the UserRepository trait.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// MongoDB user repository implementation.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a repository bound to the `users` collection.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(User::COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn insert(&self, user: &User) -> Result<ObjectId, AppError> {
        let result = self.collection.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Internal("inserted user id was not an ObjectId".into()))
    }

    async fn update_display_name(
        &self,
        id: ObjectId,
        display_name: &str,
    ) -> Result<(), AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "display_name": display_name } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }
}
