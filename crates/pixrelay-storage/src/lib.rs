//! Pixrelay Storage Library
//!
//! This crate provides the storage abstraction the relay works against and
//! its implementations: S3 (via `object_store`) and an in-memory backend
//! used by tests.
//!
//! Keys are full object keys within the configured bucket
//! (`images/...`, `images-archive/...`); the relay never constructs keys
//! outside those namespaces.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
