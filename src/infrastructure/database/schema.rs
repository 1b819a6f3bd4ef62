//! Document Schema Registry
//!
//! Associates the document models with the active database before any
//! document operation runs. Registration creates each collection's indexes;
//! MongoDB treats re-creation of an identical index as a no-op, so the
//! operation is idempotent.

use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use tracing::debug;

use crate::domain::{ChatMessage, ConversationState, User};

/// A document model descriptor: collection name plus its index definitions.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    pub collection: &'static str,
    pub indexes: Vec<IndexModel>,
}

/// The full set of document schemas the application uses.
///
/// Every collection the repositories touch must be listed here so its
/// indexes exist before traffic is accepted.
pub fn document_schemas() -> Vec<SchemaDescriptor> {
    vec![
        SchemaDescriptor {
            collection: User::COLLECTION,
            indexes: vec![IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build()],
        },
        SchemaDescriptor {
            collection: ChatMessage::COLLECTION,
            indexes: vec![IndexModel::builder()
                .keys(doc! { "user_id": 1, "created_at": 1 })
                .build()],
        },
        SchemaDescriptor {
            collection: ConversationState::COLLECTION,
            indexes: vec![IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build()],
        },
    ]
}

/// Register every document schema against the selected database.
///
/// Runs during startup, after the liveness probe and before the server
/// begins serving. Safe to invoke more than once against the same handle.
pub async fn register_schemas(database: &Database) -> Result<(), mongodb::error::Error> {
    for schema in document_schemas() {
        let collection = database.collection::<bson::Document>(schema.collection);
        collection.create_indexes(schema.indexes).await?;
        debug!(collection = schema.collection, "Registered document schema");
    }
    Ok(())
}
