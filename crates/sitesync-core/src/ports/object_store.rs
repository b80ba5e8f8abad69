//! Destination object store port (driven/secondary port)
//!
//! The write side of replication. Keys mirror upstream paths verbatim
//! (leading slash included); there is no renaming or namespacing.

use crate::domain::SyncError;

/// Put/delete operations against the destination bucket
///
/// ## Implementation notes
///
/// - `put_object` overwrites any existing object at the key and stores it
///   with a public-read access policy.
/// - `delete_object` is idempotent: deleting an absent key succeeds.
/// - Failures map to [`SyncError::Replication`] so the orchestrator can
///   isolate them per entry instead of aborting the run.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` at `key` with the given content type.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), SyncError>;

    /// Deletes the object at `key`, succeeding if it is already absent.
    async fn delete_object(&self, key: &str) -> Result<(), SyncError>;
}
