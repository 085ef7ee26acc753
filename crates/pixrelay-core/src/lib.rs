//! Pixrelay Core Library
//!
//! This crate provides the domain models, constants, configuration, and pure
//! key rules shared across all pixrelay components.
//!
//! # Key namespaces
//!
//! Inbound images live under `images/{name}`; relayed objects move to
//! `images-archive/{name}`. The two keys differ only by that prefix. Key
//! derivation is centralized in the `keys` module so all components stay
//! consistent.

pub mod config;
pub mod constants;
pub mod keys;
pub mod models;

// Re-export commonly used types
pub use config::RelayConfig;
pub use models::{
    ChangeRecord, Credentials, EventEnvelope, ObjectIdentity, ObjectRef, StoredObject,
};
