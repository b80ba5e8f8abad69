//! Error types for sync runs
//!
//! One enum covers every failure class a sync run can hit, so the
//! orchestrator and dispatcher can decide per kind whether to abort the
//! run or isolate the failure to a single entry.

use thiserror::Error;

/// Errors that can occur during a synchronization run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Upstream listing or download failure (network, auth, malformed response)
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The upstream rejected the resumption cursor (expired or invalid)
    #[error("upstream rejected cursor: {0}")]
    InvalidCursor(String),

    /// Relational or cursor store failure
    #[error("store error: {0}")]
    Store(String),

    /// Destination upload/delete failure for a single object key
    #[error("replication failed for {key}: {reason}")]
    Replication {
        /// The destination object key
        key: String,
        /// Human-readable failure cause
        reason: String,
    },

    /// Malformed inbound notification body
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Invalid path format or content
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Invalid account identifier
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    /// Invalid cursor value (e.g. empty string where a cursor is required)
    #[error("invalid cursor value: {0}")]
    InvalidCursorValue(String),
}

impl SyncError {
    /// Returns true if this error aborts the whole account run.
    ///
    /// Replication failures are isolated per entry; everything else is
    /// fatal for the run (but never for sibling accounts).
    pub fn aborts_run(&self) -> bool {
        !matches!(self, SyncError::Replication { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::Upstream("connection refused".to_string());
        assert_eq!(err.to_string(), "upstream error: connection refused");

        let err = SyncError::Replication {
            key: "/acme/index.html".to_string(),
            reason: "access denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "replication failed for /acme/index.html: access denied"
        );
    }

    #[test]
    fn test_replication_errors_do_not_abort() {
        let err = SyncError::Replication {
            key: "/a/b".to_string(),
            reason: "x".to_string(),
        };
        assert!(!err.aborts_run());
    }

    #[test]
    fn test_other_errors_abort() {
        assert!(SyncError::Upstream("x".into()).aborts_run());
        assert!(SyncError::InvalidCursor("x".into()).aborts_run());
        assert!(SyncError::Store("x".into()).aborts_run());
        assert!(SyncError::BadRequest("x".into()).aborts_run());
    }

    #[test]
    fn test_error_equality() {
        let err1 = SyncError::Store("down".to_string());
        let err2 = SyncError::Store("down".to_string());
        assert_eq!(err1, err2);
        assert_ne!(err1, SyncError::Store("up".to_string()));
    }
}
