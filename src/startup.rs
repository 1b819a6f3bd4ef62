//! Application Startup
//!
//! Application building and server initialization.
//!
//! The assembly order is fixed: settings are resolved by the caller, the
//! database is initialized (connection, liveness probe, schema registration)
//! before anything else, and only then is the listener bound. The server
//! never accepts a connection with an uninitialized database.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use mongodb::Database;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::infrastructure::cache::ConversationCache;
use crate::infrastructure::database;
use crate::infrastructure::llm::GroqClient;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging, SessionLayer};
use crate::shared::crypto::MessageCipher;

/// Port the server listens on
const DEFAULT_PORT: u16 = 8000;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Arc<Settings>,
    pub cipher: MessageCipher,
    pub cache: ConversationCache,
    pub llm: Arc<GroqClient>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Database first: connection, ping, and schema registration must
        // complete before the listener exists
        let db = database::init_db(&settings).await?;

        // Conversation cache; degrades to a no-op when Redis is down
        let cache = ConversationCache::connect(&settings.redis_url).await;

        // An invalid encryption key fails the boot, not the first request
        let cipher = MessageCipher::new(&settings.fernet_key)?;

        let llm = Arc::new(GroqClient::new(
            &settings.groq_api_key,
            &settings.groq_model,
        ));

        let state = AppState {
            db,
            settings: Arc::new(settings),
            cipher,
            cache,
            llm,
        };

        let router = build_router(state);

        // Bind to address
        let addr = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Build the router with the full middleware stack.
///
/// Layer order matters: the CORS layer is outermost so a disallowed origin
/// is answered before the session layer touches any state, and the session
/// layer wraps router dispatch.
pub fn build_router(state: AppState) -> Router {
    let session_layer = SessionLayer::new(&state.settings.secret_key);

    routes::create_router(state)
        .layer(session_layer)
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer())
}
