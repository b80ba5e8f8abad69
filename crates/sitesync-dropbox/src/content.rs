//! Dropbox content host downloads
//!
//! The download endpoint lives on the content host and takes its argument
//! in the `Dropbox-API-Arg` header rather than the request body; the
//! response body is the raw file bytes.

use serde_json::json;
use tracing::debug;

use sitesync_core::domain::{SitePath, SyncError};

use crate::client::{transport_error, DropboxClient};

/// Content path for file downloads
const DOWNLOAD_PATH: &str = "/files/download";

/// Downloads a file's bytes by its account-relative path.
pub async fn download(client: &DropboxClient, path: &SitePath) -> Result<Vec<u8>, SyncError> {
    let arg = json!({ "path": path.as_str() }).to_string();

    let response = client
        .content_request(DOWNLOAD_PATH)
        .header("Dropbox-API-Arg", arg)
        .send()
        .await
        .map_err(|e| transport_error("download request failed", e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::Upstream(format!(
            "download of {path} returned {status}: {body}"
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error("failed to read download body", e))?;

    debug!(%path, size = bytes.len(), "downloaded file");
    Ok(bytes.to_vec())
}
