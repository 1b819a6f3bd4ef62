//! Message Encryption
//!
//! Fernet-based symmetric encryption for chat message content at rest.
//! The key comes from the `FERNET_KEY` setting and must be a url-safe
//! base64-encoded 32-byte value.

use std::sync::Arc;

use fernet::Fernet;

/// Errors raised by the message cipher.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("FERNET_KEY is not a valid url-safe base64 32-byte key")]
    InvalidKey,

    #[error("ciphertext is not a valid token for the configured key")]
    InvalidToken,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidPayload,
}

/// Symmetric cipher for chat message content.
///
/// Cloneable and cheap to share; constructed once during application
/// assembly so an invalid key fails the boot instead of the first request.
#[derive(Clone)]
pub struct MessageCipher {
    fernet: Arc<Fernet>,
}

impl MessageCipher {
    /// Build a cipher from the configured key.
    pub fn new(key: &str) -> Result<Self, CipherError> {
        Fernet::new(key)
            .map(|fernet| Self {
                fernet: Arc::new(fernet),
            })
            .ok_or(CipherError::InvalidKey)
    }

    /// Encrypt a plaintext message into a Fernet token.
    pub fn encrypt(&self, plaintext: &str) -> String {
        self.fernet.encrypt(plaintext.as_bytes())
    }

    /// Decrypt a Fernet token back into the plaintext message.
    pub fn decrypt(&self, token: &str) -> Result<String, CipherError> {
        let bytes = self
            .fernet
            .decrypt(token)
            .map_err(|_| CipherError::InvalidToken)?;
        String::from_utf8(bytes).map_err(|_| CipherError::InvalidPayload)
    }
}

impl std::fmt::Debug for MessageCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material through Debug output
        f.debug_struct("MessageCipher").finish_non_exhaustive()
    }
}
