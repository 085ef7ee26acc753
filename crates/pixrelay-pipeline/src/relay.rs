//! Relay orchestration: one notification in, one terminal outcome out.

use std::sync::Arc;

use pixrelay_secrets::CredentialCache;
use pixrelay_storage::Storage;

use crate::dispatcher::{self, Dispatch};
use crate::error::RelayError;
use crate::fetcher::{self, Fetch};
use crate::forwarder::Forwarder;
use crate::outcome::{Outcome, SkipReason};
use crate::transform::Transformer;
use crate::validator::{self, Validation};

/// The ingestion-relay pipeline. One instance per process, shared by all
/// in-flight invocations; per-invocation state stays on the stack.
pub struct RelayPipeline {
    source_bucket: String,
    storage: Arc<dyn Storage>,
    transformer: Arc<dyn Transformer>,
    forwarder: Arc<dyn Forwarder>,
    credentials: Arc<CredentialCache>,
}

impl RelayPipeline {
    pub fn new(
        source_bucket: impl Into<String>,
        storage: Arc<dyn Storage>,
        transformer: Arc<dyn Transformer>,
        forwarder: Arc<dyn Forwarder>,
        credentials: Arc<CredentialCache>,
    ) -> Self {
        Self {
            source_bucket: source_bucket.into(),
            storage,
            transformer,
            forwarder,
            credentials,
        }
    }

    /// Handle one notification end to end.
    ///
    /// Benign terminal states come back as [`Outcome`]; every error is fatal
    /// for this invocation and the caller decides redelivery.
    pub async fn handle(&self, raw: &str) -> Result<Outcome, RelayError> {
        let event = match validator::validate(raw, &self.source_bucket)? {
            Validation::Skip(reason) => return Ok(Outcome::Skipped(reason)),
            Validation::Valid(event) => event,
        };

        tracing::info!(
            bucket = %event.identity.bucket,
            key = %event.identity.key,
            size_bytes = event.size_bytes,
            "Processing storage change"
        );

        let identity = match dispatcher::dispatch(&event, self.transformer.as_ref()).await? {
            Dispatch::Deferred => return Ok(Outcome::Deferred),
            Dispatch::Continue(identity) => identity,
        };

        // First credential resolution starts now and overlaps the fetch; the
        // forward awaits it just before signing.
        let warm = Arc::clone(&self.credentials);
        tokio::spawn(async move { warm.warm().await });

        let object = match fetcher::fetch(self.storage.as_ref(), &identity).await? {
            Fetch::AlreadyArchived => {
                return Ok(Outcome::Skipped(SkipReason::AlreadyArchived {
                    key: identity.key.clone(),
                }))
            }
            Fetch::Fetched(object) => object,
        };

        let credentials = self.credentials.get().await?;
        self.forwarder.forward(&object, &credentials).await?;

        fetcher::archive(self.storage.as_ref(), &identity).await?;

        Ok(Outcome::Completed)
    }
}
