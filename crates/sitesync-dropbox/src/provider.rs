//! `ChangeSource` port implementation backed by the Dropbox API

use async_trait::async_trait;

use sitesync_core::domain::{Cursor, DeltaPage, SitePath, SyncError};
use sitesync_core::ports::ChangeSource;

use crate::client::DropboxClient;
use crate::{content, delta};

#[async_trait]
impl ChangeSource for DropboxClient {
    /// Fetches one page: the initial recursive listing when no cursor is
    /// stored yet, a continuation otherwise.
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<DeltaPage, SyncError> {
        match cursor {
            None => delta::list_folder(self).await,
            Some(cursor) => delta::list_folder_continue(self, cursor).await,
        }
    }

    async fn download(&self, path: &SitePath) -> Result<Vec<u8>, SyncError> {
        content::download(self, path).await
    }
}
