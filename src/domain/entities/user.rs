//! User entity and repository trait.
//!
//! Maps to the `users` collection.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account of the wellness companion.
///
/// Stored in the `users` collection:
/// - _id: ObjectId
/// - email: unique index
/// - display_name: shown in the client
/// - password_hash: Argon2 hash, absent for OAuth-only accounts
/// - google_id: Google OAuth subject, absent for password accounts
/// - created_at: BSON datetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document id, absent until the first insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Email address (unique)
    pub email: String,

    /// Display name shown in the client
    pub display_name: String,

    /// Argon2 password hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Google OAuth subject id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,

    /// Account creation timestamp
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Collection name for schema registration.
    pub const COLLECTION: &'static str = "users";

    /// Create a new password-based account.
    pub fn with_password(email: String, display_name: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            display_name,
            password_hash: Some(password_hash),
            google_id: None,
            created_at: Utc::now(),
        }
    }

    /// Whether this account can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by document id.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user and return the assigned id.
    async fn insert(&self, user: &User) -> Result<ObjectId, AppError>;

    /// Update a user's display name.
    async fn update_display_name(&self, id: ObjectId, display_name: &str)
        -> Result<(), AppError>;
}
