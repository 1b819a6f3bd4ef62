//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration is read from a `.env` file (searched next to the binary's
//! working directory, then one directory up) overlaid with real environment
//! variables, which take priority.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kairos_server::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Documents live in {}", settings.mongodb_db);
//! ```

mod settings;

pub use settings::*;
