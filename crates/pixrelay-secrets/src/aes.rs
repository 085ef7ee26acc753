//! AES-256-GCM secret store.
//!
//! Ciphertext layout: base64 of `nonce || ciphertext` with a 12-byte nonce.
//! The 256-bit key comes from the `ENCRYPTION_KEY` environment variable
//! (base64-encoded).

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::env;

use crate::store::{SecretStore, SecretsError, SecretsResult};

/// Secret store backed by AES-256-GCM authenticated encryption.
#[derive(Clone)]
pub struct AesGcmSecretStore {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for AesGcmSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmSecretStore")
            .field("cipher", &"<redacted>")
            .finish()
    }
}

impl AesGcmSecretStore {
    /// Create a store from a raw 32-byte key (e.g. for tests; avoids env
    /// mutation).
    pub fn from_key_bytes(key_bytes: &[u8]) -> SecretsResult<Self> {
        if key_bytes.len() != 32 {
            return Err(SecretsError::ConfigError(
                "Encryption key must be 32 bytes (256 bits)".to_string(),
            ));
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Create a store from the environment. Expects `ENCRYPTION_KEY` to be a
    /// base64-encoded 32-byte key.
    pub fn from_env() -> SecretsResult<Self> {
        let key_str = env::var("ENCRYPTION_KEY").map_err(|_| {
            SecretsError::ConfigError("ENCRYPTION_KEY environment variable not set".to_string())
        })?;

        let key_bytes = general_purpose::STANDARD.decode(&key_str).map_err(|e| {
            SecretsError::ConfigError(format!("Failed to decode encryption key: {}", e))
        })?;

        Self::from_key_bytes(&key_bytes)
    }

    /// Encrypt a plaintext string. Used by operational tooling and tests to
    /// produce the ciphertext values carried in configuration.
    pub fn encrypt(&self, plaintext: &str) -> SecretsResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| SecretsError::ConfigError(format!("Encryption failed: {}", e)))?;

        // Combine nonce and ciphertext, then base64 encode
        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(&combined))
    }

    fn decrypt_value(&self, encrypted: &str) -> Result<String, String> {
        let combined = general_purpose::STANDARD
            .decode(encrypted)
            .map_err(|e| format!("Failed to decode encrypted data: {}", e))?;

        if combined.len() < 12 {
            return Err("Encrypted data too short".to_string());
        }

        // Extract nonce (first 12 bytes) and ciphertext (rest)
        let nonce = Nonce::from_slice(&combined[..12]);
        let ciphertext = &combined[12..];

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| format!("Decryption failed: {}", e))?;

        String::from_utf8(plaintext).map_err(|e| format!("Invalid UTF-8 in decrypted data: {}", e))
    }
}

#[async_trait]
impl SecretStore for AesGcmSecretStore {
    async fn decrypt(&self, name: &str, ciphertext: &str) -> SecretsResult<String> {
        self.decrypt_value(ciphertext)
            .map_err(|reason| SecretsError::DecryptFailed {
                name: name.to_string(),
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> AesGcmSecretStore {
        let test_key = b"01234567890123456789012345678901";
        AesGcmSecretStore::from_key_bytes(test_key).unwrap()
    }

    #[tokio::test]
    async fn encryption_round_trip() {
        let store = test_store();
        let plaintext = "target_api_key_12345";

        let encrypted = store.encrypt(plaintext).unwrap();
        assert_ne!(encrypted, plaintext);

        let decrypted = store.decrypt("TEST", &encrypted).await.unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[tokio::test]
    async fn tampered_ciphertext_fails() {
        let store = test_store();
        let mut encrypted = store.encrypt("secret").unwrap();
        encrypted.replace_range(0..2, "AA");

        let err = store.decrypt("TEST", &encrypted).await.unwrap_err();
        assert!(matches!(err, SecretsError::DecryptFailed { .. }));
    }

    #[tokio::test]
    async fn short_ciphertext_fails() {
        let store = test_store();
        let err = store.decrypt("TEST", "AAAA").await.unwrap_err();
        assert!(matches!(err, SecretsError::DecryptFailed { .. }));
    }

    #[test]
    fn rejects_wrong_key_size() {
        let err = AesGcmSecretStore::from_key_bytes(b"too-short").unwrap_err();
        assert!(matches!(err, SecretsError::ConfigError(_)));
    }
}
