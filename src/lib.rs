//! # Kairos Server Library
//!
//! This crate provides the backend for the Kairos mental wellness companion:
//! - RESTful HTTP API endpoints for auth, chat, and user management
//! - MongoDB for document storage with startup schema registration
//! - Redis for conversation-state caching
//! - Groq-backed language model integration for the companion chat
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Document entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: MongoDB, Redis, and Groq implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! kairos_server/
//! +-- config/        Configuration management
//! +-- domain/        Document entities and repository traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database, cache, and LLM implementations
//! +-- presentation/  HTTP routes and middleware
//! +-- shared/        Common utilities (errors, message cipher)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
