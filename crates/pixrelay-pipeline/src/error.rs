//! Relay error taxonomy.
//!
//! Every variant here is fatal to the invocation: the consumer leaves the
//! message for the delivery system's redelivery policy. Benign terminal
//! states are [`crate::Outcome`] variants, not errors.

use thiserror::Error;

use pixrelay_secrets::SecretsError;
use pixrelay_storage::StorageError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid notification payload: {0}")]
    InvalidNotification(String),

    #[error("Expected exactly one change record, saw {0}")]
    MalformedBatch(usize),

    #[error("Bucket mismatch: expected {expected}, saw {actual}")]
    BucketMismatch { expected: String, actual: String },

    #[error("Resize failed for {key}")]
    TransformFailed { key: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Credential resolution failed: {0}")]
    Credentials(#[from] SecretsError),

    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Forward transport error: {0}")]
    Transport(String),

    #[error("Target API rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}
