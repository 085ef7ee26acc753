//! Signed forward to the target ingestion API.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use pixrelay_core::{Credentials, StoredObject};

use crate::error::RelayError;
use crate::signer::{sign_request, SigningEndpoint};

/// Route for image ingestion, fixed beneath the target API's base path.
pub const INGEST_PATH: &str = "/image";

/// Headers the transport computes itself. They participate in signing but
/// must not be sent explicitly.
const TRANSPORT_HEADERS: [&str; 2] = ["host", "content-length"];

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Send the object to the target API, authenticated as `credentials`.
    async fn forward(
        &self,
        object: &StoredObject,
        credentials: &Credentials,
    ) -> Result<(), RelayError>;
}

/// Forwarder that signs with SigV4 and posts over HTTPS.
pub struct SignedForwarder {
    client: reqwest::Client,
    endpoint: SigningEndpoint,
}

impl SignedForwarder {
    /// `endpoint.path` is the target API's base path; the ingest route is
    /// appended here.
    pub fn new(mut endpoint: SigningEndpoint) -> Self {
        endpoint.path = format!("{}{}", endpoint.path, INGEST_PATH);
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Forwarder for SignedForwarder {
    async fn forward(
        &self,
        object: &StoredObject,
        credentials: &Credentials,
    ) -> Result<(), RelayError> {
        let signed = sign_request(object, credentials, &self.endpoint, Utc::now());

        let mut headers = HeaderMap::new();
        for (name, value) in &signed.headers {
            if TRANSPORT_HEADERS.contains(&name.as_str()) {
                continue;
            }
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RelayError::Signing(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| RelayError::Signing(e.to_string()))?;
            headers.insert(name, value);
        }

        let response = self
            .client
            .post(&signed.url)
            .headers(headers)
            .body(signed.body.clone())
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::error!(
                host = %self.endpoint.host,
                status = status.as_u16(),
                body = %body,
                "Target API rejected forward"
            );
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            host = %self.endpoint.host,
            status = status.as_u16(),
            body = %body,
            "Target API accepted forward"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_route_is_appended_to_base_path() {
        let forwarder = SignedForwarder::new(SigningEndpoint {
            host: "api.example.com".to_string(),
            path: "/v1".to_string(),
            region: "eu-west-1".to_string(),
            service: "execute-api".to_string(),
        });

        assert_eq!(forwarder.endpoint.path, "/v1/image");
    }
}
