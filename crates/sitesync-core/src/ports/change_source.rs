//! Upstream change source port (driven/secondary port)
//!
//! Interface to the cloud-storage account being mirrored. The primary
//! implementation targets the Dropbox v2 API, but the trait is
//! provider-agnostic: anything that can produce a cursor-resumable change
//! stream and serve file content fits.

use crate::domain::{Cursor, DeltaPage, SitePath, SyncError};

/// Port trait for reading an account's change stream and file content
///
/// ## Implementation notes
///
/// - `fetch_page(None)` performs a full recursive listing from the root;
///   `fetch_page(Some(cursor))` continues the stream from that point.
/// - A rejected cursor (expired or malformed upstream-side) must surface
///   as [`SyncError::InvalidCursor`], not a generic upstream error, so the
///   caller can distinguish "retry later" from "resync required".
/// - Deletions must appear as distinct entries, never silently dropped.
#[async_trait::async_trait]
pub trait ChangeSource: Send + Sync {
    /// Fetches one page of changed entries.
    ///
    /// The caller persists the returned page's cursor before requesting
    /// the next page; implementations must not fetch ahead.
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<DeltaPage, SyncError>;

    /// Downloads the current content of a file by its upstream path.
    async fn download(&self, path: &SitePath) -> Result<Vec<u8>, SyncError>;
}
