//! Download tests against a mocked Dropbox content host

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use sitesync_core::domain::{SitePath, SyncError};
use sitesync_core::ports::ChangeSource;

use crate::common::{setup_dropbox_mock, TEST_TOKEN};

#[tokio::test]
async fn download_sends_path_in_api_arg_header_and_returns_bytes() {
    let (server, client) = setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/download"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}")))
        .and(header(
            "Dropbox-API-Arg",
            json!({ "path": "/acme/logo.png" }).to_string(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
        .mount(&server)
        .await;

    let file = SitePath::try_from("/acme/logo.png").unwrap();
    let bytes = client.download(&file).await.unwrap();

    assert_eq!(bytes, b"png-bytes");
}

#[tokio::test]
async fn download_of_missing_file_is_an_upstream_error() {
    let (server, client) = setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/download"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error_summary": "path/not_found/..",
            "error": { ".tag": "path" }
        })))
        .mount(&server)
        .await;

    let file = SitePath::try_from("/acme/missing.txt").unwrap();
    let err = client.download(&file).await.unwrap_err();

    match err {
        SyncError::Upstream(message) => assert!(message.contains("/acme/missing.txt")),
        other => panic!("expected upstream error, got {other:?}"),
    }
}
