//! Domain types
//!
//! Validated newtypes, the change-entry sum type, content-type inference,
//! and the error enum shared across all crates.

pub mod content_type;
pub mod entry;
pub mod errors;
pub mod newtypes;

pub use content_type::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use entry::{ChangeEntry, DeltaPage};
pub use errors::SyncError;
pub use newtypes::{AccountId, Cursor, SitePath};
