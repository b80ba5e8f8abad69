//! Dropbox API HTTP client
//!
//! Provides a typed HTTP client for the Dropbox v2 API. Handles bearer
//! authentication and endpoint construction for both API hosts: the RPC
//! host (JSON in, JSON out) and the content host (file bytes out).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitesync_dropbox::client::DropboxClient;
//!
//! # async fn example() -> Result<(), sitesync_core::domain::SyncError> {
//! let client = DropboxClient::new("access-token-here");
//! let page = sitesync_dropbox::delta::list_folder(&client).await?;
//! println!("{} entries", page.entries.len());
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, RequestBuilder};
use sitesync_core::domain::SyncError;

/// Base URL for Dropbox RPC endpoints
const API_BASE_URL: &str = "https://api.dropboxapi.com/2";

/// Base URL for Dropbox content endpoints (downloads)
const CONTENT_BASE_URL: &str = "https://content.dropboxapi.com/2";

/// HTTP client for Dropbox v2 API calls
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction. Dropbox RPC endpoints are always POST.
pub struct DropboxClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for RPC requests
    api_base_url: String,
    /// Base URL for content requests
    content_base_url: String,
    /// Per-account OAuth2 access token
    access_token: String,
}

impl DropboxClient {
    /// Creates a client for one account's access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base_url: API_BASE_URL.to_string(),
            content_base_url: CONTENT_BASE_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Creates a client with custom base URLs (useful for testing)
    pub fn with_base_urls(
        access_token: impl Into<String>,
        api_base_url: impl Into<String>,
        content_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base_url: api_base_url.into(),
            content_base_url: content_base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Creates an authenticated POST request builder for an RPC path
    ///
    /// Prepends the API base URL and adds the Authorization header.
    pub fn rpc_request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base_url, path);
        self.client.post(&url).bearer_auth(&self.access_token)
    }

    /// Creates an authenticated POST request builder for a content path
    pub fn content_request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.content_base_url, path);
        self.client.post(&url).bearer_auth(&self.access_token)
    }
}

/// Maps a transport-level failure to an upstream error.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> SyncError {
    SyncError::Upstream(format!("{context}: {err}"))
}
