//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT token issuance
//! - **ChatService**: Companion conversation turns and history

pub mod auth_service;
pub mod chat_service;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthTokens, Claims};

// Re-export chat service types
pub use chat_service::ChatService;
