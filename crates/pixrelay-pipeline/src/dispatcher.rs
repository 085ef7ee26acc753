//! Size-gated dispatch ahead of the relay.

use pixrelay_core::constants::RESIZE_THRESHOLD_BYTES;
use pixrelay_core::ObjectIdentity;

use crate::error::RelayError;
use crate::transform::{ResizeRequest, Transformer};
use crate::validator::ObjectEvent;

/// Dispatch verdict for a validated event.
#[derive(Debug)]
pub enum Dispatch {
    /// Object is small enough to relay as-is.
    Continue(ObjectIdentity),
    /// Oversized object handed to the transform service; its new version's
    /// own notification finishes the relay on a later invocation.
    Deferred,
}

/// Decide whether the object relays directly or goes through the transform
/// service first.
pub async fn dispatch(
    event: &ObjectEvent,
    transformer: &dyn Transformer,
) -> Result<Dispatch, RelayError> {
    if event.size_bytes <= RESIZE_THRESHOLD_BYTES {
        return Ok(Dispatch::Continue(event.identity.clone()));
    }

    tracing::info!(
        key = %event.identity.key,
        size_bytes = event.size_bytes,
        "Image exceeds resize threshold, delegating to transform service"
    );

    let request = ResizeRequest {
        bucket: event.identity.bucket.clone(),
        key: event.identity.key.clone(),
        version_id: event.version_id.clone(),
    };

    let response = transformer.resize(&request).await?;

    if response.version_id.is_some() {
        // The transform wrote a new object version; that version's change
        // notification completes the relay.
        return Ok(Dispatch::Deferred);
    }

    tracing::error!(key = %event.identity.key, "Transform service reported no new version");
    Err(RelayError::TransformFailed {
        key: event.identity.key.clone(),
    })
}
