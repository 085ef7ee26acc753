//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement. The relay only ever needs single-object operations: fetch
//! (optionally by version), existence check, put, copy, and delete.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use pixrelay_core::StoredObject;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, in-memory) must implement this trait. This
/// allows the relay pipeline to work with any backend without coupling to
/// implementation details.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch an object, optionally pinned to a specific version.
    async fn get(&self, key: &str, version: Option<&str>) -> StorageResult<StoredObject>;

    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Store an object; returns the new version identifier when the backend
    /// versions objects.
    async fn put(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<Option<String>>;

    /// Copy an object from one key to another within the bucket.
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()>;

    /// Delete an object by key. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
