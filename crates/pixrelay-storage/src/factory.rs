use std::sync::Arc;

use pixrelay_core::RelayConfig;

use crate::{Storage, StorageResult};

/// Create the storage backend for the configured source bucket.
#[cfg(feature = "storage-s3")]
pub async fn create_storage(config: &RelayConfig) -> StorageResult<Arc<dyn Storage>> {
    let storage = crate::S3Storage::new(
        config.source_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )
    .await?;

    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
pub async fn create_storage(_config: &RelayConfig) -> StorageResult<Arc<dyn Storage>> {
    Err(crate::StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}
