//! Integration tests for sitesync-dropbox
//!
//! Uses wiremock to simulate the Dropbox v2 API and verifies end-to-end
//! behavior of the client, listing pagination, and downloads.

mod common;

mod test_delta;
mod test_download;
