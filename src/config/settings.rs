//! Application settings and configuration structures.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

/// Variables that must be present and non-empty for the service to boot.
pub const REQUIRED_VARS: [&str; 3] = ["SECRET_KEY", "FERNET_KEY", "GROQ_API_KEY"];

/// Variables that may be left empty (OAuth is optional in development).
pub const OPTIONAL_VARS: [&str; 2] = ["GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"];

/// Root configuration structure containing all application settings.
///
/// Constructed once at process start and never mutated afterwards. Components
/// receive it explicitly (usually behind an `Arc`) rather than reaching for
/// global state, so tests can build alternate instances freely.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Secret key for signing access tokens and session cookies
    pub secret_key: String,

    /// JWT signing algorithm
    pub algorithm: String,

    /// Access token expiry in minutes
    pub access_token_expire_minutes: i64,

    /// MongoDB connection URL
    pub mongodb_url: String,

    /// MongoDB database name
    pub mongodb_db: String,

    /// Redis connection URL for the conversation cache
    pub redis_url: String,

    /// Fernet key for chat message encryption at rest
    pub fernet_key: String,

    /// Groq API key for chat completions
    pub groq_api_key: String,

    /// Groq model identifier
    pub groq_model: String,

    /// Google OAuth client id (empty when OAuth is disabled)
    pub google_client_id: String,

    /// Google OAuth client secret (empty when OAuth is disabled)
    pub google_client_secret: String,
}

/// Errors raised while resolving settings.
///
/// These are boot-time fatal conditions. Library code returns them; the
/// binary entry point decides to print the diagnostic and exit non-zero.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no .env file found; searched {} and {}", .searched[0].display(), .searched[1].display())]
    NotFound { searched: [PathBuf; 2] },

    #[error("failed to read configuration file: {0}")]
    Unreadable(#[from] dotenvy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),

    #[error("missing required configuration variables: {}", .missing.join(", "))]
    MissingRequired { missing: Vec<&'static str> },
}

impl SettingsError {
    /// Operator-facing remediation text listing every recognized variable.
    pub fn remediation(&self) -> String {
        format!(
            "Required variables: {}\nOptional variables: {}\n\
             All other recognized keys have defaults. Create a .env file or \
             export the variables before starting the server.",
            REQUIRED_VARS.join(", "),
            OPTIONAL_VARS.join(", "),
        )
    }
}

impl Settings {
    /// Load settings from the located `.env` file and the process environment.
    ///
    /// The `.env` file is searched for next to the working directory first,
    /// then one directory up, so the server can be started from either the
    /// project root or the inner application directory. Real environment
    /// variables override values from the file.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if no file is found at either path, the file
    /// cannot be parsed, or a required variable is missing or empty. No
    /// partially-filled `Settings` is ever returned.
    pub fn load() -> Result<Self, SettingsError> {
        let path = locate_env_file(Path::new("."))?;
        tracing::info!(path = %path.display(), "Loading configuration");

        let mut vars: Map<String, String> = Map::new();
        for item in dotenvy::from_path_iter(&path)? {
            let (key, value) = item?;
            vars.insert(key, value);
        }

        // The process environment takes priority over the file contents
        for (key, value) in std::env::vars() {
            vars.insert(key, value);
        }

        Self::from_map(vars)
    }

    /// Build settings from an explicit key/value map.
    ///
    /// Keys are matched case-insensitively and unrecognized keys are ignored,
    /// so configuration sources can grow without breaking older binaries.
    pub fn from_map(vars: Map<String, String>) -> Result<Self, SettingsError> {
        let settings: Self = Config::builder()
            .set_default("secret_key", "")?
            .set_default("algorithm", "HS256")?
            .set_default("access_token_expire_minutes", 60 * 24 * 7)?
            .set_default("mongodb_url", "mongodb://localhost:27017")?
            .set_default("mongodb_db", "mental_wellness")?
            .set_default("redis_url", "redis://localhost:6379/0")?
            .set_default("fernet_key", "")?
            .set_default("groq_api_key", "")?
            .set_default("groq_model", "mixtral-8x7b-32768")?
            .set_default("google_client_id", "")?
            .set_default("google_client_secret", "")?
            .add_source(Environment::default().source(Some(vars)))
            .build()?
            .try_deserialize()?;

        settings.validate_required()?;
        Ok(settings)
    }

    /// Reject a settings value whose required fields are missing or blank.
    fn validate_required(&self) -> Result<(), SettingsError> {
        let mut missing = Vec::new();
        if self.secret_key.trim().is_empty() {
            missing.push("SECRET_KEY");
        }
        if self.fernet_key.trim().is_empty() {
            missing.push("FERNET_KEY");
        }
        if self.groq_api_key.trim().is_empty() {
            missing.push("GROQ_API_KEY");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::MissingRequired { missing })
        }
    }

    /// Whether Google OAuth is configured for this deployment.
    pub fn google_oauth_enabled(&self) -> bool {
        !self.google_client_id.is_empty() && !self.google_client_secret.is_empty()
    }
}

/// Locate the `.env` file relative to `base`.
///
/// The primary location is `base/.env`; the fallback is `base/../.env`. This
/// two-tier search lets the same tree run from the repository root or from
/// the application directory without code changes.
pub fn locate_env_file(base: &Path) -> Result<PathBuf, SettingsError> {
    let primary = base.join(".env");
    if primary.is_file() {
        return Ok(primary);
    }

    let fallback = base.join("..").join(".env");
    if fallback.is_file() {
        return Ok(fallback);
    }

    Err(SettingsError::NotFound {
        searched: [primary, fallback],
    })
}
