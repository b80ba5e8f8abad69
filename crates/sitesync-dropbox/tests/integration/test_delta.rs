//! Listing and continuation tests against a mocked Dropbox API

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use sitesync_core::domain::{ChangeEntry, Cursor, SyncError};
use sitesync_core::ports::ChangeSource;

use crate::common::{
    deleted_entry, file_entry, folder_entry, mount_list_folder, mount_list_folder_continue,
    setup_dropbox_mock,
};

#[tokio::test]
async fn initial_listing_maps_entries_and_cursor() {
    let (server, client) = setup_dropbox_mock().await;
    mount_list_folder(
        &server,
        json!({
            "entries": [
                file_entry("/acme/index.html", 2048),
                folder_entry("/acme/css"),
                deleted_entry("/acme/old.txt")
            ],
            "cursor": "cursor-1",
            "has_more": false
        }),
    )
    .await;

    let page = client.fetch_page(None).await.unwrap();

    assert_eq!(page.cursor.as_str(), "cursor-1");
    assert!(!page.has_more);
    assert_eq!(page.entries.len(), 3);

    match &page.entries[0] {
        ChangeEntry::File { path, size, .. } => {
            assert_eq!(path.as_str(), "/acme/index.html");
            assert_eq!(*size, Some(2048));
        }
        other => panic!("expected file, got {other:?}"),
    }
    assert!(matches!(page.entries[1], ChangeEntry::Directory { .. }));
    assert!(matches!(page.entries[2], ChangeEntry::Deleted { .. }));
}

#[tokio::test]
async fn continuation_uses_the_given_cursor() {
    let (server, client) = setup_dropbox_mock().await;
    mount_list_folder_continue(
        &server,
        "cursor-1",
        json!({
            "entries": [file_entry("/acme/new.txt", 10)],
            "cursor": "cursor-2",
            "has_more": true
        }),
    )
    .await;

    let cursor = Cursor::try_from("cursor-1".to_string()).unwrap();
    let page = client.fetch_page(Some(&cursor)).await.unwrap();

    assert_eq!(page.cursor.as_str(), "cursor-2");
    assert!(page.has_more);
    assert_eq!(page.entries.len(), 1);
}

#[tokio::test]
async fn conflict_on_continue_surfaces_as_invalid_cursor() {
    let (server, client) = setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/list_folder/continue"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error_summary": "reset/..",
            "error": { ".tag": "reset" }
        })))
        .mount(&server)
        .await;

    let cursor = Cursor::try_from("stale".to_string()).unwrap();
    let err = client.fetch_page(Some(&cursor)).await.unwrap_err();

    assert!(matches!(err, SyncError::InvalidCursor(_)));
}

#[tokio::test]
async fn server_error_surfaces_as_upstream() {
    let (server, client) = setup_dropbox_mock().await;
    Mock::given(method("POST"))
        .and(path("/files/list_folder"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client.fetch_page(None).await.unwrap_err();

    match err {
        SyncError::Upstream(message) => assert!(message.contains("500")),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn pathless_entries_are_dropped_without_failing_the_page() {
    let (server, client) = setup_dropbox_mock().await;
    mount_list_folder(
        &server,
        json!({
            "entries": [
                { ".tag": "folder", "name": "" },
                file_entry("/acme/kept.txt", 1)
            ],
            "cursor": "cursor-1",
            "has_more": false
        }),
    )
    .await;

    let page = client.fetch_page(None).await.unwrap();

    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].path().as_str(), "/acme/kept.txt");
}
