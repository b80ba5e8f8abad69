//! Account synchronization use case
//!
//! Drives one sync run for one account: load the cursor, walk the change
//! stream page by page, filter entries against domain ownership, replicate
//! qualifying files, and checkpoint the cursor after every page.
//!
//! ## Checkpoint semantics
//!
//! The page's cursor is persisted before the next page is requested
//! (at-least-once): a crash mid-run re-processes at most one page on the
//! next notification, and never loses entries.
//!
//! ## Error policy
//!
//! Replication failures (destination put/delete) are isolated per entry
//! and accumulated in the outcome; upstream, store, and cursor failures
//! abort the run for this account only. The caller logs the result; the
//! HTTP path never observes it.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::{content_type_for, AccountId, ChangeEntry, SyncError};
use crate::ports::{ChangeSource, CursorStore, ObjectStore, TenantDirectory};

/// Summary of a completed sync run for one account
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// Files downloaded and uploaded to the destination
    pub files_copied: u32,
    /// Deletions mirrored to the destination
    pub files_removed: u32,
    /// Entries skipped (directories, non-owned or domain-less paths)
    pub entries_skipped: u32,
    /// Pages fetched from upstream
    pub pages: u32,
    /// Per-entry replication failures (non-fatal)
    pub errors: Vec<String>,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// What applying a single entry did
enum EntryAction {
    Copied,
    Removed,
    Skipped,
}

/// Use case for synchronizing one account's changes to the destination store
pub struct SyncAccount {
    changes: Arc<dyn ChangeSource>,
    cursors: Arc<dyn CursorStore>,
    tenants: Arc<dyn TenantDirectory>,
    objects: Arc<dyn ObjectStore>,
}

impl SyncAccount {
    /// Creates the use case with its four port dependencies.
    pub fn new(
        changes: Arc<dyn ChangeSource>,
        cursors: Arc<dyn CursorStore>,
        tenants: Arc<dyn TenantDirectory>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            changes,
            cursors,
            tenants,
            objects,
        }
    }

    /// Runs one full sync for `account`.
    ///
    /// Iterates pages until upstream reports no more. Concurrent runs for
    /// different accounts share no mutable state; serializing runs for the
    /// same account is the dispatcher's job.
    pub async fn run(&self, account: AccountId) -> Result<SyncOutcome, SyncError> {
        let started = Instant::now();
        let mut outcome = SyncOutcome::default();

        let mut cursor = self.cursors.get(account).await?;
        debug!(
            %account,
            resuming = cursor.is_some(),
            "starting sync run"
        );

        loop {
            let page = self.changes.fetch_page(cursor.as_ref()).await?;
            outcome.pages += 1;

            // Order within a page carries no meaning upstream.
            for entry in &page.entries {
                match self.apply_entry(account, entry).await {
                    Ok(EntryAction::Copied) => outcome.files_copied += 1,
                    Ok(EntryAction::Removed) => outcome.files_removed += 1,
                    Ok(EntryAction::Skipped) => outcome.entries_skipped += 1,
                    Err(err) if err.aborts_run() => return Err(err),
                    Err(err) => {
                        warn!(%account, path = %entry.path(), error = %err, "entry failed");
                        outcome.errors.push(err.to_string());
                    }
                }
            }

            // Checkpoint before requesting the next page.
            self.cursors.set(account, &page.cursor).await?;

            let has_more = page.has_more;
            cursor = Some(page.cursor);
            if !has_more {
                break;
            }
        }

        outcome.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            %account,
            copied = outcome.files_copied,
            removed = outcome.files_removed,
            skipped = outcome.entries_skipped,
            pages = outcome.pages,
            errors = outcome.errors.len(),
            duration_ms = outcome.duration_ms,
            "sync run finished"
        );
        Ok(outcome)
    }

    /// Applies one entry: mirror a deletion, replicate an owned file, or skip.
    async fn apply_entry(
        &self,
        account: AccountId,
        entry: &ChangeEntry,
    ) -> Result<EntryAction, SyncError> {
        match entry {
            // Deletions are mirrored unconditionally; the entry no longer
            // carries enough upstream state for an ownership check.
            ChangeEntry::Deleted { path } => {
                debug!(%account, %path, "removing object");
                self.objects.delete_object(path.as_str()).await?;
                Ok(EntryAction::Removed)
            }
            ChangeEntry::Directory { .. } => Ok(EntryAction::Skipped),
            ChangeEntry::File { path, .. } => {
                let Some(domain) = path.domain() else {
                    // Top-level file with no domain segment: not owned.
                    return Ok(EntryAction::Skipped);
                };
                if !self.tenants.owns_domain(account, domain).await? {
                    return Ok(EntryAction::Skipped);
                }

                let bytes = self.changes.download(path).await?;
                let content_type = content_type_for(path);
                debug!(%account, %path, content_type, size = bytes.len(), "copying object");
                self.objects
                    .put_object(path.as_str(), bytes, content_type)
                    .await?;
                Ok(EntryAction::Copied)
            }
        }
    }
}
