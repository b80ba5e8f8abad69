//! SiteSync Dropbox - Dropbox v2 API client
//!
//! Provides the upstream adapter for SiteSync:
//! - Recursive account listings and cursor-based continuation
//! - File content downloads from the content host
//! - The [`sitesync_core::ports::ChangeSource`] implementation
//!
//! ## Modules
//!
//! - [`client`] - Dropbox API HTTP client
//! - [`delta`] - `list_folder` endpoints for incremental change listing
//! - [`content`] - Content host downloads

pub mod client;
pub mod content;
pub mod delta;
mod provider;

pub use client::DropboxClient;
