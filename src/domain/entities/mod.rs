//! # Domain Entities
//!
//! Document entities representing the main business objects of the wellness
//! companion. All entities map directly to their MongoDB collections and are
//! registered with the database during startup.
//!
//! ## Core Entities
//!
//! - **User**: User account with authentication data and profile
//! - **ChatMessage**: One turn of a companion conversation, encrypted at rest
//! - **ConversationState**: Rolling per-user conversation summary
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod chat_message;
mod conversation_state;
mod user;

pub use chat_message::{ChatMessage, ChatMessageRepository, MessageRole};
pub use conversation_state::{ConversationState, ConversationStateRepository};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use chat_message::MockChatMessageRepository;
#[cfg(test)]
pub use conversation_state::MockConversationStateRepository;
#[cfg(test)]
pub use user::MockUserRepository;
