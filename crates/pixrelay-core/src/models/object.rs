//! Object identity and the transient stored-object representation.

use std::collections::HashMap;

use bytes::Bytes;

use crate::keys;

/// Location of an object in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentity {
    pub bucket: String,
    pub key: String,
}

impl ObjectIdentity {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Identity of the archive counterpart. Same bucket; the key differs
    /// only by the archive prefix.
    pub fn archive(&self) -> ObjectIdentity {
        ObjectIdentity {
            bucket: self.bucket.clone(),
            key: keys::archive_key(&self.key),
        }
    }
}

/// One object as fetched from the store. Owned by a single invocation and
/// dropped when it finishes; never cached across invocations.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub content_length: u64,
    pub metadata: HashMap<String, String>,
    pub version_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_identity_keeps_bucket() {
        let identity = ObjectIdentity::new("photos", "images/a.jpg");
        let archive = identity.archive();

        assert_eq!(archive.bucket, "photos");
        assert_eq!(archive.key, "images-archive/a.jpg");
    }
}
