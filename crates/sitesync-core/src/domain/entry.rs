//! Change entries and delta pages
//!
//! `ChangeEntry` is the tagged sum type the upstream adapter produces for
//! each changed file-system object: a file, a directory, or a deletion.
//! Deleted entries carry only a path. Entries are transient; nothing
//! retains them across runs except via the persisted cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{Cursor, SitePath};

/// A single changed object from the upstream account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeEntry {
    /// A file that was created or modified upstream
    File {
        /// Full upstream path, also the destination object key
        path: SitePath,
        /// Size in bytes, when reported
        size: Option<u64>,
        /// Last server-side modification time, when reported
        modified: Option<DateTime<Utc>>,
    },
    /// A directory entry; never replicated
    Directory {
        /// Full upstream path
        path: SitePath,
    },
    /// An object removed upstream; mirrored as a destination delete
    Deleted {
        /// Full upstream path of the removed object
        path: SitePath,
    },
}

impl ChangeEntry {
    /// The entry's path, whatever its kind.
    #[must_use]
    pub fn path(&self) -> &SitePath {
        match self {
            ChangeEntry::File { path, .. }
            | ChangeEntry::Directory { path }
            | ChangeEntry::Deleted { path } => path,
        }
    }
}

/// One page of an account's change stream
///
/// The cursor marks progress through the stream and must be persisted
/// before the next page is requested. `has_more` signals that another
/// page is available via that cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaPage {
    /// Changed objects in this page, in no guaranteed order
    pub entries: Vec<ChangeEntry>,
    /// Resumption point after this page
    pub cursor: Cursor,
    /// Whether another page follows
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> SitePath {
        SitePath::try_from(s).unwrap()
    }

    #[test]
    fn entry_path_accessor_covers_all_kinds() {
        let file = ChangeEntry::File {
            path: path("/acme/a.txt"),
            size: Some(12),
            modified: None,
        };
        let dir = ChangeEntry::Directory {
            path: path("/acme"),
        };
        let deleted = ChangeEntry::Deleted {
            path: path("/acme/b.txt"),
        };

        assert_eq!(file.path().as_str(), "/acme/a.txt");
        assert_eq!(dir.path().as_str(), "/acme");
        assert_eq!(deleted.path().as_str(), "/acme/b.txt");
    }

    #[test]
    fn delta_page_holds_cursor_and_pagination_flag() {
        let page = DeltaPage {
            entries: vec![],
            cursor: Cursor::try_from("c1".to_string()).unwrap(),
            has_more: true,
        };
        assert!(page.has_more);
        assert_eq!(page.cursor.as_str(), "c1");
    }
}
