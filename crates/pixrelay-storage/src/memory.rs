//! In-memory storage backend.
//!
//! Versioned just enough for relay tests: every put stamps a monotonically
//! increasing version id. Read operations are recorded in an operation log
//! so tests can assert what the pipeline touched and in which order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use pixrelay_core::StoredObject;

use crate::traits::{Storage, StorageError, StorageResult};

#[derive(Clone)]
struct MemoryObject {
    body: Bytes,
    content_type: String,
    metadata: HashMap<String, String>,
    version_id: String,
}

/// In-memory storage implementation
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, MemoryObject>>,
    version_counter: AtomicU64,
    operations: Mutex<Vec<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations performed through the trait so far, oldest first.
    /// Seeding via `put` is not recorded.
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().expect("operation log poisoned").clone()
    }

    fn record(&self, operation: String) {
        self.operations
            .lock()
            .expect("operation log poisoned")
            .push(operation);
    }

    fn next_version(&self) -> String {
        format!("v-{}", self.version_counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str, version: Option<&str>) -> StorageResult<StoredObject> {
        self.record(format!("get {}", key));

        let objects = self.objects.lock().expect("object map poisoned");
        let entry = objects
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        // Only the latest version is retained; a stale version pin behaves
        // like a missing object.
        if let Some(version) = version {
            if version != entry.version_id {
                return Err(StorageError::NotFound(key.to_string()));
            }
        }

        Ok(StoredObject {
            body: entry.body.clone(),
            content_type: entry.content_type.clone(),
            content_length: entry.body.len() as u64,
            metadata: entry.metadata.clone(),
            version_id: Some(entry.version_id.clone()),
        })
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.record(format!("exists {}", key));

        let objects = self.objects.lock().expect("object map poisoned");
        Ok(objects.contains_key(key))
    }

    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<Option<String>> {
        let version_id = self.next_version();
        let mut objects = self.objects.lock().expect("object map poisoned");
        objects.insert(
            key.to_string(),
            MemoryObject {
                body,
                content_type: content_type.to_string(),
                metadata,
                version_id: version_id.clone(),
            },
        );

        Ok(Some(version_id))
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
        self.record(format!("copy {} {}", from_key, to_key));

        let mut objects = self.objects.lock().expect("object map poisoned");
        let entry = objects
            .get(from_key)
            .cloned()
            .ok_or_else(|| StorageError::CopyFailed(format!("{} does not exist", from_key)))?;
        objects.insert(to_key.to_string(), entry);

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.record(format!("delete {}", key));

        let mut objects = self.objects.lock().expect("object map poisoned");
        objects.remove(key);

        Ok(())
    }
}
