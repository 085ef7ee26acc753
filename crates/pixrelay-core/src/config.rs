//! Configuration module
//!
//! Environment-driven configuration for the relay service, read once at
//! process start. `.env` files are honored for local development.

use std::env;

const DEFAULT_TARGET_API_SERVICE: &str = "execute-api";

/// Relay service configuration.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Bucket whose change notifications this process relays.
    pub source_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (e.g. MinIO).
    pub s3_endpoint: Option<String>,
    // Target ingestion API
    pub target_api_host: String,
    pub target_api_path: String,
    pub target_api_region: String,
    pub target_api_service: String,
    /// Endpoint of the transform service invoked for oversized objects.
    pub transform_service_url: String,
    /// Queue delivering change notifications.
    pub queue_url: String,
    // Encrypted target API credentials, decrypted lazily on first forward.
    pub encrypted_access_key: String,
    pub encrypted_secret_key: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(Self {
            source_bucket: require("SOURCE_BUCKET")?,
            s3_region: require("S3_REGION")?,
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            target_api_host: require("TARGET_API_HOST")?,
            target_api_path: require("TARGET_API_PATH")?,
            target_api_region: require("TARGET_API_REGION")?,
            target_api_service: env::var("TARGET_API_SERVICE")
                .unwrap_or_else(|_| DEFAULT_TARGET_API_SERVICE.to_string()),
            transform_service_url: require("TRANSFORM_SERVICE_URL")?,
            queue_url: require("QUEUE_URL")?,
            encrypted_access_key: require("TARGET_ACCESS_KEY_ENCRYPTED")?,
            encrypted_secret_key: require("TARGET_SECRET_KEY_ENCRYPTED")?,
        })
    }
}

fn require(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}
