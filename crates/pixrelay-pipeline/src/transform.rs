//! Transform service collaborator.
//!
//! Oversized objects are handed to an external transform service that writes
//! a re-encoded version under the same key. The version identifier in the
//! response is the success marker: a new version raises its own change
//! notification, which drives the relay of the shrunk object.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Request carried to the transform service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeRequest {
    pub bucket: String,
    pub key: String,
    #[serde(rename = "versionId", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Transform service response. A missing version id means the transform did
/// not produce a new object version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResizeResponse {
    #[serde(rename = "VersionId")]
    pub version_id: Option<String>,
}

#[async_trait]
pub trait Transformer: Send + Sync {
    /// Re-encode the referenced object in place, synchronously.
    async fn resize(&self, request: &ResizeRequest) -> Result<ResizeResponse, RelayError>;
}

/// HTTP client for the transform service.
pub struct HttpTransformer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransformer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Transformer for HttpTransformer {
    async fn resize(&self, request: &ResizeRequest) -> Result<ResizeResponse, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, body = %body, "Transform service returned an error");
            // A failed transform reports no new version; the dispatcher
            // classifies that as a resize failure.
            return Ok(ResizeResponse::default());
        }

        response
            .json::<ResizeResponse>()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))
    }
}
