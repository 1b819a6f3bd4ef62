//! Database Module
//!
//! MongoDB connection, liveness probe, and document schema registration.

pub mod schema;

use std::time::Duration;

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{error, info};

use crate::config::Settings;

/// Budget for MongoDB server selection before the connection attempt fails.
/// The startup path fails fast instead of hanging on an unreachable server.
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised during database initialization.
///
/// Every variant is fatal for the serving phase: the caller must not start
/// accepting traffic when initialization fails.
#[derive(Debug, thiserror::Error)]
pub enum DbInitError {
    #[error("invalid MongoDB connection string {url}: {source}")]
    BadUrl {
        url: String,
        source: mongodb::error::Error,
    },

    #[error("MongoDB unreachable at {url} (database {database}): {source}")]
    Unreachable {
        url: String,
        database: String,
        source: mongodb::error::Error,
    },

    #[error("schema registration failed for database {database}: {source}")]
    Registration {
        database: String,
        source: mongodb::error::Error,
    },
}

/// Initialize the database connection used for the lifetime of the process.
///
/// Steps, in order:
/// 1. Parse the configured URL and open a client with a bounded
///    server-selection timeout.
/// 2. Probe liveness with an admin `ping`; a probe failure is treated as a
///    connection failure.
/// 3. Select the configured database by name.
/// 4. Register the document schemas against it (see [`schema`]).
///
/// Called exactly once at startup, before the server accepts requests. There
/// is no retry loop; restart policy belongs to the process manager.
///
/// # Errors
///
/// Returns `DbInitError` on any failure, after logging the attempted URL and
/// database name with remediation hints.
pub async fn init_db(settings: &Settings) -> Result<Database, DbInitError> {
    let url = &settings.mongodb_url;
    let db_name = &settings.mongodb_db;
    info!(url = %url, database = %db_name, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(url).await.map_err(|source| {
        error!(url = %url, "MongoDB connection string could not be parsed");
        DbInitError::BadUrl {
            url: url.clone(),
            source,
        }
    })?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let client = Client::with_options(options).map_err(|source| DbInitError::BadUrl {
        url: url.clone(),
        source,
    })?;

    // Liveness probe; the client itself connects lazily
    if let Err(source) = client.database("admin").run_command(doc! { "ping": 1 }).await {
        error!(
            url = %url,
            database = %db_name,
            error = %source,
            "MongoDB liveness probe failed. Make sure MongoDB is running \
             (run 'mongod' or 'sudo systemctl start mongod') or check \
             MONGODB_URL in your .env file"
        );
        return Err(DbInitError::Unreachable {
            url: url.clone(),
            database: db_name.clone(),
            source,
        });
    }

    let database = client.database(db_name);

    schema::register_schemas(&database)
        .await
        .map_err(|source| {
            error!(database = %db_name, error = %source, "Schema registration failed");
            DbInitError::Registration {
                database: db_name.clone(),
                source,
            }
        })?;

    info!(database = %db_name, "Database initialized");
    Ok(database)
}
