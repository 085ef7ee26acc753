//! Pixrelay Secrets Library
//!
//! Credential handling for the relay: the `SecretStore` seam that turns
//! named ciphertext into plaintext, an AES-256-GCM implementation of it,
//! and the process-lifetime `CredentialCache` with single-flight
//! initialization.

pub mod aes;
pub mod cache;
pub mod store;

// Re-export commonly used types
pub use aes::AesGcmSecretStore;
pub use cache::{CredentialCache, EncryptedCredentials, ACCESS_KEY_NAME, SECRET_KEY_NAME};
pub use store::{SecretStore, SecretsError, SecretsResult};
