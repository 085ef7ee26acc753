//! Process-lifetime credential cache with single-flight initialization.
//!
//! The first caller decrypts each named ciphertext value independently and
//! in parallel; every caller that arrives while that is outstanding waits on
//! the same in-flight resolution. The outcome, success or failure, is
//! memoized for the life of the process. The cache never retries: a failed
//! resolution is handed to every later caller, and a process restart is the
//! recovery path.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::OnceCell;

use pixrelay_core::Credentials;

use crate::store::{SecretStore, SecretsError, SecretsResult};

/// Names of the ciphertext values making up one credential record.
pub const ACCESS_KEY_NAME: &str = "TARGET_ACCESS_KEY";
pub const SECRET_KEY_NAME: &str = "TARGET_SECRET_KEY";

/// Encrypted credential material carried in configuration.
#[derive(Clone)]
pub struct EncryptedCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Lazily resolved, process-wide credentials for the target API.
pub struct CredentialCache {
    store: Arc<dyn SecretStore>,
    encrypted: EncryptedCredentials,
    cell: OnceCell<SecretsResult<Credentials>>,
}

impl CredentialCache {
    pub fn new(store: Arc<dyn SecretStore>, encrypted: EncryptedCredentials) -> Self {
        Self {
            store,
            encrypted,
            cell: OnceCell::new(),
        }
    }

    /// Resolve the credentials, decrypting on first use.
    pub async fn get(&self) -> SecretsResult<Credentials> {
        self.cell.get_or_init(|| self.resolve()).await.clone()
    }

    /// Kick the first resolution off early; the outcome surfaces from the
    /// `get` call that eventually needs it.
    pub async fn warm(&self) {
        if let Err(e) = self.get().await {
            tracing::warn!(error = %e, "Early credential resolution failed");
        }
    }

    async fn resolve(&self) -> SecretsResult<Credentials> {
        let named = [
            (ACCESS_KEY_NAME, self.encrypted.access_key.as_str()),
            (SECRET_KEY_NAME, self.encrypted.secret_key.as_str()),
        ];

        // Each named secret decrypts independently and in parallel.
        let pairs = try_join_all(named.into_iter().map(|(name, ciphertext)| {
            let store = Arc::clone(&self.store);
            async move {
                let plaintext = store.decrypt(name, ciphertext).await?;
                Ok::<_, SecretsError>((name, plaintext))
            }
        }))
        .await?;

        let mut by_name: HashMap<&str, String> = pairs.into_iter().collect();
        let credentials = Credentials {
            access_key: take_named(&mut by_name, ACCESS_KEY_NAME)?,
            secret_key: take_named(&mut by_name, SECRET_KEY_NAME)?,
        };

        tracing::info!("Target API credentials resolved");
        Ok(credentials)
    }
}

fn take_named(by_name: &mut HashMap<&str, String>, name: &str) -> SecretsResult<String> {
    by_name
        .remove(name)
        .ok_or_else(|| SecretsError::ConfigError(format!("Missing decrypted value for {}", name)))
}
