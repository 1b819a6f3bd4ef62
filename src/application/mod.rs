//! Application Layer
//!
//! Contains business logic services and data transfer objects (DTOs).
//! Services orchestrate the conversation and account flows between the
//! presentation layer and the domain repositories.

pub mod dto;
pub mod services;
