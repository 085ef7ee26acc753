//! Object fetch and terminal archive steps.

use pixrelay_core::{ObjectIdentity, StoredObject};
use pixrelay_storage::{Storage, StorageError};

use crate::error::RelayError;

/// Fetch verdict for the source object.
#[derive(Debug)]
pub enum Fetch {
    Fetched(StoredObject),
    /// Source missing but its archive counterpart exists: a duplicate
    /// delivery already relayed this object.
    AlreadyArchived,
}

/// Fetch the source object, treating a missing-but-archived object as a
/// benign duplicate delivery.
pub async fn fetch(storage: &dyn Storage, identity: &ObjectIdentity) -> Result<Fetch, RelayError> {
    match storage.get(&identity.key, None).await {
        Ok(object) => Ok(Fetch::Fetched(object)),
        Err(StorageError::NotFound(_)) => {
            let archive = identity.archive();
            match storage.exists(&archive.key).await {
                Ok(true) => {
                    tracing::info!(
                        key = %identity.key,
                        archive_key = %archive.key,
                        "Object missing but already archived, skipping"
                    );
                    Ok(Fetch::AlreadyArchived)
                }
                // The archive probe is best-effort; surface the original
                // not-found either way.
                Ok(false) | Err(_) => {
                    Err(RelayError::Storage(StorageError::NotFound(
                        identity.key.clone(),
                    )))
                }
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Copy the relayed object into the archive namespace, then delete the
/// source.
///
/// Not transactional: a failure after the copy leaves a duplicate until the
/// next delivery takes the already-archived path.
pub async fn archive(storage: &dyn Storage, identity: &ObjectIdentity) -> Result<(), RelayError> {
    let archive = identity.archive();

    tracing::info!(
        key = %identity.key,
        archive_key = %archive.key,
        "Archiving relayed object"
    );

    storage.copy(&identity.key, &archive.key).await?;
    storage.delete(&identity.key).await?;

    Ok(())
}
