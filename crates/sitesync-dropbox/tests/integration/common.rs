//! Shared test helpers for Dropbox API integration tests
//!
//! Provides wiremock-based mock server setup. Each helper mounts one
//! endpoint on the given server; the client points both the RPC and
//! content base URLs at the same mock server.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesync_dropbox::DropboxClient;

pub const TEST_TOKEN: &str = "test-access-token";

/// Starts a mock server and returns it with a client pointed at it.
pub async fn setup_dropbox_mock() -> (MockServer, DropboxClient) {
    let server = MockServer::start().await;
    let client = DropboxClient::with_base_urls(TEST_TOKEN, server.uri(), server.uri());
    (server, client)
}

/// Mounts the initial listing endpoint returning the given page body.
///
/// Matches only the documented request shape: a recursive listing rooted
/// at the empty path, with bearer auth.
pub async fn mount_list_folder(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/files/list_folder"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}")))
        .and(body_json(serde_json::json!({
            "path": "",
            "recursive": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts the continuation endpoint for one specific cursor.
pub async fn mount_list_folder_continue(
    server: &MockServer,
    cursor: &str,
    body: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path("/files/list_folder/continue"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}")))
        .and(body_json(serde_json::json!({ "cursor": cursor })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Builds a file entry as the listing endpoints return it.
pub fn file_entry(path_display: &str, size: u64) -> serde_json::Value {
    serde_json::json!({
        ".tag": "file",
        "name": path_display.rsplit('/').next().unwrap(),
        "path_lower": path_display.to_lowercase(),
        "path_display": path_display,
        "size": size,
        "server_modified": "2026-07-01T14:00:00Z"
    })
}

pub fn folder_entry(path_display: &str) -> serde_json::Value {
    serde_json::json!({
        ".tag": "folder",
        "name": path_display.rsplit('/').next().unwrap(),
        "path_lower": path_display.to_lowercase(),
        "path_display": path_display
    })
}

pub fn deleted_entry(path_display: &str) -> serde_json::Value {
    serde_json::json!({
        ".tag": "deleted",
        "name": path_display.rsplit('/').next().unwrap(),
        "path_lower": path_display.to_lowercase(),
        "path_display": path_display
    })
}
