//! Inbound notification validation.
//!
//! Filters non-actionable notifications (connectivity tests, foreign keys)
//! and extracts the object identity from the single change record a real
//! notification must carry.

use pixrelay_core::constants::{IMAGE_EXTENSIONS, SOURCE_PREFIX};
use pixrelay_core::keys;
use pixrelay_core::models::EventEnvelope;
use pixrelay_core::ObjectIdentity;

use crate::error::RelayError;
use crate::outcome::SkipReason;

/// A change record that passed validation.
#[derive(Debug, Clone)]
pub struct ObjectEvent {
    pub identity: ObjectIdentity,
    pub size_bytes: u64,
    pub version_id: Option<String>,
}

/// Validation verdict: proceed with the event or skip benignly.
#[derive(Debug)]
pub enum Validation {
    Valid(ObjectEvent),
    Skip(SkipReason),
}

/// Parse and sanity-check one raw notification payload.
pub fn validate(raw: &str, source_bucket: &str) -> Result<Validation, RelayError> {
    let envelope: EventEnvelope =
        serde_json::from_str(raw).map_err(|e| RelayError::InvalidNotification(e.to_string()))?;

    if envelope.is_test_event() {
        tracing::info!("Skipping connectivity test event");
        return Ok(Validation::Skip(SkipReason::TestEvent));
    }

    if envelope.records.len() != 1 {
        return Err(RelayError::MalformedBatch(envelope.records.len()));
    }

    let record = &envelope.records[0];
    let bucket = &record.s3.bucket.name;
    let object = &record.s3.object;

    if bucket != source_bucket {
        return Err(RelayError::BucketMismatch {
            expected: source_bucket.to_string(),
            actual: bucket.clone(),
        });
    }

    let extension = keys::file_extension(&object.key);
    if !object.key.starts_with(SOURCE_PREFIX) || !IMAGE_EXTENSIONS.contains(&extension) {
        // Bucket notifications should be filtered upstream; guard anyway.
        tracing::info!(key = %object.key, "Object is not a relayable image, skipping");
        return Ok(Validation::Skip(SkipReason::NotAnImage {
            key: object.key.clone(),
        }));
    }

    Ok(Validation::Valid(ObjectEvent {
        identity: ObjectIdentity::new(bucket.clone(), object.key.clone()),
        size_bytes: object.size,
        version_id: object.version_id.clone(),
    }))
}
