//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.
//!
//! The test application wires the real router and middleware stack against a
//! lazily-connecting MongoDB client, so every test that stays off the
//! database path (greeting, CORS, validation, auth rejection) runs without
//! any live service.

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use config::Map;
use tower::ServiceExt;

use kairos_server::config::Settings;
use kairos_server::infrastructure::cache::ConversationCache;
use kairos_server::infrastructure::llm::GroqClient;
use kairos_server::shared::crypto::MessageCipher;
use kairos_server::startup::{build_router, AppState};

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with offline dependencies
    pub async fn new() -> Self {
        let state = test_state().await;

        Self {
            router: build_router(state),
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Send an arbitrary request
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Settings for tests: required values present, everything else defaulted
pub fn test_settings() -> Settings {
    let mut vars = Map::new();
    vars.insert("SECRET_KEY".into(), "integration-test-secret".into());
    vars.insert("FERNET_KEY".into(), fernet::Fernet::generate_key());
    vars.insert("GROQ_API_KEY".into(), "test-key".into());
    Settings::from_map(vars).unwrap()
}

/// Application state whose MongoDB client connects lazily and whose cache
/// and language model never leave the process
pub async fn test_state() -> AppState {
    let settings = test_settings();

    let mut options = mongodb::options::ClientOptions::parse(&settings.mongodb_url)
        .await
        .unwrap();
    options.server_selection_timeout = Some(std::time::Duration::from_millis(100));
    let client = mongodb::Client::with_options(options).unwrap();
    let db = client.database("kairos_test");

    let cipher = MessageCipher::new(&settings.fernet_key).unwrap();
    let llm = Arc::new(GroqClient::new(
        &settings.groq_api_key,
        &settings.groq_model,
    ));

    AppState {
        db,
        settings: Arc::new(settings),
        cipher,
        cache: ConversationCache::disabled(),
        llm,
    }
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
