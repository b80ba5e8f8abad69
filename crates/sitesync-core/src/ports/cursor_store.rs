//! Cursor store port (driven/secondary port)

use crate::domain::{AccountId, Cursor, SyncError};

/// Per-account persistence of the change-stream resumption cursor
///
/// Keyed by the account's decimal identifier. Absence (no cursor stored
/// yet) is distinguishable from any stored value: `get` returns `None`
/// for never-synced accounts, and [`Cursor`] is non-empty by construction
/// so the empty string can never be confused with a valid token.
#[async_trait::async_trait]
pub trait CursorStore: Send + Sync {
    /// Reads the stored cursor for an account, if any.
    async fn get(&self, account: AccountId) -> Result<Option<Cursor>, SyncError>;

    /// Stores (or overwrites) the cursor for an account.
    ///
    /// Called once per page fetched, including intermediate pages, so a
    /// crashed run resumes near where it stopped.
    async fn set(&self, account: AccountId, cursor: &Cursor) -> Result<(), SyncError>;
}
