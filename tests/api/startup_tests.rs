//! Startup Failure Tests
//!
//! The database is a hard startup dependency: initialization failures must
//! propagate so the server never starts serving against a broken database.

use config::Map;

use kairos_server::config::Settings;
use kairos_server::infrastructure::database::{self, DbInitError};
use kairos_server::startup::Application;

fn settings_with_db_url(url: &str) -> Settings {
    let mut vars = Map::new();
    vars.insert("SECRET_KEY".into(), "integration-test-secret".into());
    vars.insert("FERNET_KEY".into(), fernet::Fernet::generate_key());
    vars.insert("GROQ_API_KEY".into(), "test-key".into());
    vars.insert("MONGODB_URL".into(), url.into());
    vars.insert("MONGODB_DB".into(), "kairos_test".into());
    Settings::from_map(vars).unwrap()
}

#[tokio::test]
async fn malformed_connection_string_fails_initialization() {
    let settings = settings_with_db_url("definitely-not-a-mongodb-url");

    let Err(error) = database::init_db(&settings).await else {
        panic!("initialization succeeded against a malformed URL");
    };
    assert!(matches!(error, DbInitError::BadUrl { .. }));
    assert!(error.to_string().contains("definitely-not-a-mongodb-url"));
}

#[tokio::test]
async fn unreachable_server_error_names_the_url_and_database() {
    // Port 1 is never a MongoDB server; the liveness probe gives up after
    // the bounded server-selection timeout
    let settings = settings_with_db_url("mongodb://127.0.0.1:1");

    let Err(error) = database::init_db(&settings).await else {
        panic!("initialization succeeded against an unreachable server");
    };
    assert!(matches!(error, DbInitError::Unreachable { .. }));

    let message = error.to_string();
    assert!(message.contains("mongodb://127.0.0.1:1"));
    assert!(message.contains("kairos_test"));
}

#[tokio::test]
async fn application_build_aborts_when_the_database_is_down() {
    let settings = settings_with_db_url("definitely-not-a-mongodb-url");

    // Build never returns a listening application with a failed database
    assert!(Application::build(settings).await.is_err());
}
