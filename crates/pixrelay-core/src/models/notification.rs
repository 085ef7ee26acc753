//! Inbound storage-change notification envelope.
//!
//! Wire shape follows the bucket-notification JSON delivered through the
//! queue: a batch wrapper with a top-level `Event` marker for connectivity
//! tests and zero or more change records, each nesting bucket name, object
//! key, size, and version. Consumed once per invocation, never persisted.

use serde::Deserialize;

/// Top-level `Event` value that marks a connectivity test.
pub const TEST_EVENT: &str = "s3:TestEvent";

/// Outer batch wrapper of a change notification.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "Event")]
    pub event: Option<String>,
    #[serde(rename = "Records", default)]
    pub records: Vec<ChangeRecord>,
}

impl EventEnvelope {
    /// Whether this envelope is a connectivity test rather than a real change.
    pub fn is_test_event(&self) -> bool {
        self.event.as_deref() == Some(TEST_EVENT)
    }
}

/// One storage-change record.
#[derive(Debug, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
    #[serde(default)]
    pub size: u64,
    // Absent when the bucket is unversioned.
    #[serde(rename = "versionId")]
    pub version_id: Option<String>,
}
