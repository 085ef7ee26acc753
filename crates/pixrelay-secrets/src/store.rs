//! Credential store seam.
//!
//! The relay treats decryption as an opaque collaborator: given a named
//! ciphertext value it returns the plaintext. The mechanism lives behind
//! this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Secret handling errors. Cloneable so a failed resolution can be memoized
/// and handed to every waiter.
#[derive(Debug, Clone, Error)]
pub enum SecretsError {
    #[error("Decryption failed for {name}: {reason}")]
    DecryptFailed { name: String, reason: String },

    #[error("Secret store configuration error: {0}")]
    ConfigError(String),
}

/// Result type for secret operations
pub type SecretsResult<T> = Result<T, SecretsError>;

/// Decrypts named ciphertext values.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Decrypt one named ciphertext value to plaintext.
    async fn decrypt(&self, name: &str, ciphertext: &str) -> SecretsResult<String>;
}
