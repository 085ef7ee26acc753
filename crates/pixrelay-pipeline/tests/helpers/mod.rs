//! Shared fixtures and mock collaborators for relay integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use pixrelay_core::{Credentials, StoredObject};
use pixrelay_pipeline::{
    Forwarder, RelayError, RelayPipeline, ResizeRequest, ResizeResponse, Transformer,
};
use pixrelay_secrets::{CredentialCache, EncryptedCredentials, SecretStore, SecretsResult};
use pixrelay_storage::{MemoryStorage, Storage};

pub const BUCKET: &str = "photos";

/// Plaintext the echo secret store produces for the rig's ciphertexts.
pub const ACCESS_KEY_PLAINTEXT: &str = "plain:ct-access";

pub fn notification(key: &str, size: u64) -> String {
    notification_for_bucket(BUCKET, key, size)
}

pub fn notification_for_bucket(bucket: &str, key: &str, size: u64) -> String {
    format!(
        r#"{{"Records":[{{"eventName":"ObjectCreated:Put","s3":{{"bucket":{{"name":"{bucket}"}},"object":{{"key":"{key}","size":{size},"versionId":"v-0"}}}}}}]}}"#
    )
}

pub fn test_event() -> String {
    r#"{"Service":"Amazon S3","Event":"s3:TestEvent","Bucket":"photos"}"#.to_string()
}

/// Transformer that records requests and answers with a configured response.
pub struct RecordingTransformer {
    response: ResizeResponse,
    pub requests: Mutex<Vec<ResizeRequest>>,
}

impl RecordingTransformer {
    pub fn answering(version_id: Option<&str>) -> Self {
        Self {
            response: ResizeResponse {
                version_id: version_id.map(String::from),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transformer for RecordingTransformer {
    async fn resize(&self, request: &ResizeRequest) -> Result<ResizeResponse, RelayError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Forwarder that records forwarded bodies and the credentials used.
pub struct RecordingForwarder {
    pub forwards: Mutex<Vec<(Bytes, String)>>,
    reject_with: Option<u16>,
}

impl RecordingForwarder {
    pub fn accepting() -> Self {
        Self {
            forwards: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            forwards: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    pub fn forward_count(&self) -> usize {
        self.forwards.lock().unwrap().len()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn forward(
        &self,
        object: &StoredObject,
        credentials: &Credentials,
    ) -> Result<(), RelayError> {
        self.forwards
            .lock()
            .unwrap()
            .push((object.body.clone(), credentials.access_key.clone()));

        if let Some(status) = self.reject_with {
            return Err(RelayError::Rejected {
                status,
                body: "rejected".to_string(),
            });
        }
        Ok(())
    }
}

/// Secret store returning `plain:{ciphertext}`, counting round trips.
pub struct EchoSecretStore {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SecretStore for EchoSecretStore {
    async fn decrypt(&self, _name: &str, ciphertext: &str) -> SecretsResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("plain:{}", ciphertext))
    }
}

pub struct TestRig {
    pub storage: Arc<MemoryStorage>,
    pub transformer: Arc<RecordingTransformer>,
    pub forwarder: Arc<RecordingForwarder>,
    pub secrets: Arc<EchoSecretStore>,
    pub pipeline: Arc<RelayPipeline>,
}

impl TestRig {
    pub fn new() -> Self {
        Self::build(
            RecordingTransformer::answering(Some("v-2")),
            RecordingForwarder::accepting(),
        )
    }

    pub fn with_transformer(transformer: RecordingTransformer) -> Self {
        Self::build(transformer, RecordingForwarder::accepting())
    }

    pub fn with_forwarder(forwarder: RecordingForwarder) -> Self {
        Self::build(RecordingTransformer::answering(Some("v-2")), forwarder)
    }

    fn build(transformer: RecordingTransformer, forwarder: RecordingForwarder) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let transformer = Arc::new(transformer);
        let forwarder = Arc::new(forwarder);
        let secrets = Arc::new(EchoSecretStore {
            calls: AtomicUsize::new(0),
        });

        let credentials = Arc::new(CredentialCache::new(
            Arc::clone(&secrets) as Arc<dyn SecretStore>,
            EncryptedCredentials {
                access_key: "ct-access".to_string(),
                secret_key: "ct-secret".to_string(),
            },
        ));

        let pipeline = Arc::new(RelayPipeline::new(
            BUCKET,
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::clone(&transformer) as Arc<dyn Transformer>,
            Arc::clone(&forwarder) as Arc<dyn Forwarder>,
            credentials,
        ));

        Self {
            storage,
            transformer,
            forwarder,
            secrets,
            pipeline,
        }
    }

    pub async fn seed(&self, key: &str, body: &[u8]) {
        self.storage
            .put(
                key,
                Bytes::copy_from_slice(body),
                "image/jpeg",
                HashMap::new(),
            )
            .await
            .unwrap();
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}
