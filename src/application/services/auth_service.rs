//! Authentication Service
//!
//! Handles registration, credential verification, and JWT token issuance.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::domain::{User, UserRepository};

/// Authentication tokens response
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user document id, hex-encoded)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Authentication service over a user repository.
pub struct AuthService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    settings: Arc<Settings>,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new AuthService
    pub fn new(users: Arc<U>, settings: Arc<Settings>) -> Self {
        Self { users, settings }
    }

    /// Register a new password-based account.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<(User, AuthTokens), AuthError> {
        if self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .is_some()
        {
            return Err(AuthError::EmailExists);
        }

        let password_hash = self.hash_password(password)?;

        let mut user =
            User::with_password(email.to_string(), display_name.to_string(), password_hash);
        let id = self
            .users
            .insert(&user)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        user.id = Some(id);

        let tokens = self.generate_tokens(id)?;
        Ok((user, tokens))
    }

    /// Authenticate with email and password.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthTokens), AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        // OAuth-only accounts carry no hash and cannot log in with a password
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let id = user
            .id
            .ok_or_else(|| AuthError::Internal("persisted user has no id".into()))?;
        let tokens = self.generate_tokens(id)?;
        Ok((user, tokens))
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate an access token for the user
    fn generate_tokens(&self, user_id: ObjectId) -> Result<AuthTokens, AuthError> {
        let algorithm: Algorithm = self
            .settings
            .algorithm
            .parse()
            .map_err(|_| AuthError::Internal(format!("Unsupported algorithm: {}", self.settings.algorithm)))?;

        let now = Utc::now();
        let expiry = now + Duration::minutes(self.settings.access_token_expire_minutes);

        let claims = Claims {
            sub: user_id.to_hex(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::new(algorithm),
            &claims,
            &EncodingKey::from_secret(self.settings.secret_key.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            expires_in: self.settings.access_token_expire_minutes * 60,
            token_type: "bearer".to_string(),
        })
    }
}
