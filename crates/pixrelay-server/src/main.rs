mod consumer;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;

use pixrelay_core::RelayConfig;
use pixrelay_pipeline::{HttpTransformer, RelayPipeline, SignedForwarder, SigningEndpoint};
use pixrelay_secrets::{AesGcmSecretStore, CredentialCache, EncryptedCredentials, SecretStore};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    telemetry::init_telemetry();

    let storage = pixrelay_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let secret_store: Arc<dyn SecretStore> = Arc::new(
        AesGcmSecretStore::from_env().context("Failed to initialize secret store")?,
    );
    let credentials = Arc::new(CredentialCache::new(
        secret_store,
        EncryptedCredentials {
            access_key: config.encrypted_access_key.clone(),
            secret_key: config.encrypted_secret_key.clone(),
        },
    ));

    let transformer = Arc::new(HttpTransformer::new(config.transform_service_url.clone()));
    let forwarder = Arc::new(SignedForwarder::new(SigningEndpoint {
        host: config.target_api_host.clone(),
        path: config.target_api_path.clone(),
        region: config.target_api_region.clone(),
        service: config.target_api_service.clone(),
    }));

    let pipeline = Arc::new(RelayPipeline::new(
        config.source_bucket.clone(),
        storage,
        transformer,
        forwarder,
        credentials,
    ));

    consumer::run(&config, pipeline).await
}
