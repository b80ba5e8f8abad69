//! Dropbox list_folder endpoints for incremental change listing
//!
//! Dropbox exposes an account's change stream through two RPC endpoints:
//!
//! 1. **Initial listing**: `POST /files/list_folder` with
//!    `{"path": "", "recursive": true}` returns the first page of the full
//!    account listing plus a cursor.
//! 2. **Continuation**: `POST /files/list_folder/continue` with a saved
//!    cursor returns only what changed since that cursor was issued.
//!
//! Both return the same page shape: entries, a new cursor, and `has_more`.
//! The caller persists the cursor between pages; neither function loops.
//!
//! A 409 from the continue endpoint means the cursor is no longer valid
//! (reset or malformed) and surfaces as [`SyncError::InvalidCursor`].

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use sitesync_core::domain::{ChangeEntry, Cursor, DeltaPage, SitePath, SyncError};

use crate::client::{transport_error, DropboxClient};

/// RPC path for the initial recursive listing
const LIST_FOLDER_PATH: &str = "/files/list_folder";

/// RPC path for cursor-based continuation
const LIST_FOLDER_CONTINUE_PATH: &str = "/files/list_folder/continue";

// ============================================================================
// Dropbox API response types (JSON deserialization)
// ============================================================================

/// Raw response shared by `list_folder` and `list_folder/continue`
///
/// See: <https://www.dropbox.com/developers/documentation/http/documentation#files-list_folder>
#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    /// Changed file-system objects in this page
    #[serde(default)]
    entries: Vec<RawEntry>,
    /// Cursor for resuming after this page
    cursor: String,
    /// Whether another page is available via the cursor
    has_more: bool,
}

/// A single metadata entry, discriminated by the `.tag` field
#[derive(Debug, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
enum RawEntry {
    File {
        path_display: Option<String>,
        path_lower: Option<String>,
        size: Option<u64>,
        server_modified: Option<DateTime<Utc>>,
    },
    Folder {
        path_display: Option<String>,
        path_lower: Option<String>,
    },
    Deleted {
        path_display: Option<String>,
        path_lower: Option<String>,
    },
}

impl RawEntry {
    /// The display path, falling back to the lowercased one.
    fn raw_path(&self) -> Option<&str> {
        let (display, lower) = match self {
            RawEntry::File {
                path_display,
                path_lower,
                ..
            }
            | RawEntry::Folder {
                path_display,
                path_lower,
            }
            | RawEntry::Deleted {
                path_display,
                path_lower,
            } => (path_display, path_lower),
        };
        display.as_deref().or(lower.as_deref())
    }
}

// ============================================================================
// PageParser - converts Dropbox responses to domain types
// ============================================================================

/// Parser for converting raw `list_folder` responses into a [`DeltaPage`]
struct PageParser;

impl PageParser {
    /// Parses one raw entry into a domain [`ChangeEntry`].
    ///
    /// Entries with no usable path (Dropbox occasionally omits
    /// `path_display`, and the root entry has none) are dropped with a
    /// warning rather than failing the page.
    fn parse_entry(raw: RawEntry) -> Option<ChangeEntry> {
        let raw_path = match raw.raw_path() {
            Some(p) => p,
            None => {
                warn!("dropping entry without a path");
                return None;
            }
        };
        let path = match SitePath::try_from(raw_path) {
            Ok(p) => p,
            Err(err) => {
                warn!(raw_path, error = %err, "dropping entry with unusable path");
                return None;
            }
        };

        Some(match raw {
            RawEntry::File {
                size,
                server_modified,
                ..
            } => ChangeEntry::File {
                path,
                size,
                modified: server_modified,
            },
            RawEntry::Folder { .. } => ChangeEntry::Directory { path },
            RawEntry::Deleted { .. } => ChangeEntry::Deleted { path },
        })
    }

    fn parse_response(response: ListFolderResponse) -> Result<DeltaPage, SyncError> {
        let entries = response
            .entries
            .into_iter()
            .filter_map(Self::parse_entry)
            .collect();
        let cursor = Cursor::try_from(response.cursor)
            .map_err(|err| SyncError::Upstream(format!("page carried invalid cursor: {err}")))?;
        Ok(DeltaPage {
            entries,
            cursor,
            has_more: response.has_more,
        })
    }
}

// ============================================================================
// List folder functions
// ============================================================================

/// Fetches the first page of a full recursive account listing.
///
/// Used when no cursor is stored for the account yet.
pub async fn list_folder(client: &DropboxClient) -> Result<DeltaPage, SyncError> {
    debug!("requesting initial recursive listing");

    let response = client
        .rpc_request(LIST_FOLDER_PATH)
        .json(&json!({ "path": "", "recursive": true }))
        .send()
        .await
        .map_err(|e| transport_error("list_folder request failed", e))?;

    read_page(response, LIST_FOLDER_PATH).await
}

/// Fetches the next page of changes after a saved cursor.
pub async fn list_folder_continue(
    client: &DropboxClient,
    cursor: &Cursor,
) -> Result<DeltaPage, SyncError> {
    debug!("requesting listing continuation");

    let response = client
        .rpc_request(LIST_FOLDER_CONTINUE_PATH)
        .json(&json!({ "cursor": cursor.as_str() }))
        .send()
        .await
        .map_err(|e| transport_error("list_folder/continue request failed", e))?;

    // Dropbox signals an expired or malformed cursor with 409.
    if response.status() == StatusCode::CONFLICT {
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::InvalidCursor(body));
    }

    read_page(response, LIST_FOLDER_CONTINUE_PATH).await
}

/// Checks the status and decodes a page body.
async fn read_page(response: reqwest::Response, path: &str) -> Result<DeltaPage, SyncError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::Upstream(format!("{path} returned {status}: {body}")));
    }

    let raw: ListFolderResponse = response
        .json()
        .await
        .map_err(|e| transport_error("failed to parse listing response", e))?;

    let page = PageParser::parse_response(raw)?;
    debug!(
        entries = page.entries.len(),
        has_more = page.has_more,
        "received listing page"
    );
    Ok(page)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_mixed_entry_kinds() {
        let json = r#"{
            "entries": [
                {
                    ".tag": "file",
                    "name": "index.html",
                    "path_lower": "/acme/index.html",
                    "path_display": "/Acme/index.html",
                    "size": 2048,
                    "server_modified": "2026-07-01T14:00:00Z"
                },
                {
                    ".tag": "folder",
                    "name": "css",
                    "path_lower": "/acme/css",
                    "path_display": "/Acme/css"
                },
                {
                    ".tag": "deleted",
                    "name": "old.txt",
                    "path_lower": "/acme/old.txt",
                    "path_display": "/Acme/old.txt"
                }
            ],
            "cursor": "AAF9x7",
            "has_more": true
        }"#;

        let response: ListFolderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.entries.len(), 3);
        assert_eq!(response.cursor, "AAF9x7");
        assert!(response.has_more);

        assert!(matches!(response.entries[0], RawEntry::File { .. }));
        assert!(matches!(response.entries[1], RawEntry::Folder { .. }));
        assert!(matches!(response.entries[2], RawEntry::Deleted { .. }));
    }

    #[test]
    fn deserialize_empty_page() {
        let json = r#"{"entries": [], "cursor": "c-empty", "has_more": false}"#;
        let response: ListFolderResponse = serde_json::from_str(json).unwrap();
        assert!(response.entries.is_empty());
        assert!(!response.has_more);
    }

    #[test]
    fn parse_file_entry_keeps_display_path_and_metadata() {
        let raw = RawEntry::File {
            path_display: Some("/Acme/report.csv".to_string()),
            path_lower: Some("/acme/report.csv".to_string()),
            size: Some(512),
            server_modified: Some("2026-07-01T14:00:00Z".parse().unwrap()),
        };

        let entry = PageParser::parse_entry(raw).unwrap();
        match entry {
            ChangeEntry::File {
                path,
                size,
                modified,
            } => {
                assert_eq!(path.as_str(), "/Acme/report.csv");
                assert_eq!(size, Some(512));
                assert!(modified.is_some());
            }
            other => panic!("expected file entry, got {other:?}"),
        }
    }

    #[test]
    fn parse_entry_falls_back_to_lower_path() {
        let raw = RawEntry::Deleted {
            path_display: None,
            path_lower: Some("/acme/gone.txt".to_string()),
        };

        let entry = PageParser::parse_entry(raw).unwrap();
        assert_eq!(entry.path().as_str(), "/acme/gone.txt");
    }

    #[test]
    fn parse_entry_without_path_is_dropped() {
        let raw = RawEntry::Folder {
            path_display: None,
            path_lower: None,
        };
        assert!(PageParser::parse_entry(raw).is_none());
    }

    #[test]
    fn parse_response_maps_entries_and_cursor() {
        let response = ListFolderResponse {
            entries: vec![
                RawEntry::File {
                    path_display: Some("/acme/a.txt".to_string()),
                    path_lower: None,
                    size: Some(1),
                    server_modified: None,
                },
                RawEntry::Folder {
                    path_display: None,
                    path_lower: None,
                },
            ],
            cursor: "c1".to_string(),
            has_more: false,
        };

        let page = PageParser::parse_response(response).unwrap();
        // The pathless folder was dropped, not fatal.
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.cursor.as_str(), "c1");
        assert!(!page.has_more);
    }

    #[test]
    fn parse_response_rejects_empty_cursor() {
        let response = ListFolderResponse {
            entries: vec![],
            cursor: String::new(),
            has_more: false,
        };
        assert!(matches!(
            PageParser::parse_response(response),
            Err(SyncError::Upstream(_))
        ));
    }
}
