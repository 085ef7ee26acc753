//! Domain models shared across pixrelay components.

pub mod credentials;
pub mod notification;
pub mod object;

pub use credentials::Credentials;
pub use notification::{BucketRef, ChangeRecord, EventEnvelope, ObjectRef, StorageEntity};
pub use object::{ObjectIdentity, StoredObject};
