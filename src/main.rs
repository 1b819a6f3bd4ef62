//! # Kairos Server
//!
//! Backend for the Kairos mental wellness companion.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading (fail-fast on missing or invalid settings)
//! - MongoDB connection and document schema registration
//! - HTTP server

use anyhow::Result;
use tracing::{error, info};

use kairos_server::config::Settings;
use kairos_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    kairos_server::telemetry::init_tracing();

    info!("Starting Kairos Server...");

    // Load configuration from the .env file and environment. Configuration
    // failures are terminal: print the diagnostic and exit non-zero without
    // touching the database.
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            eprintln!("[ERROR] {e}\n{}", e.remediation());
            std::process::exit(1);
        }
    };
    info!(
        database = %settings.mongodb_db,
        model = %settings.groq_model,
        "Configuration loaded"
    );

    // Build the application; this awaits database initialization, so a
    // failure here aborts startup before any connection is accepted
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
