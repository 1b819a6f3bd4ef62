//! Repository Implementations
//!
//! MongoDB implementations of the domain repository traits.
//!
//! Each repository owns a typed collection handle and maps database failures
//! into the shared `AppError` type.
//!
//! ## Available Repositories
//!
//! - **MongoUserRepository** - User account management
//! - **MongoChatMessageRepository** - Conversation turn persistence
//! - **MongoConversationStateRepository** - Rolling conversation summaries

mod message_repository;
mod state_repository;
mod user_repository;

pub use message_repository::MongoChatMessageRepository;
pub use state_repository::MongoConversationStateRepository;
pub use user_repository::MongoUserRepository;
