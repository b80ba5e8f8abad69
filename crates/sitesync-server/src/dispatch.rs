//! Per-account run dispatch
//!
//! The webhook handler answers immediately; the actual work happens here.
//! Each notified account gets its own spawned run, constrained by:
//!
//! - a semaphore bounding how many runs execute at once,
//! - a per-account async mutex so two notifications for the same account
//!   run back to back instead of racing each other's cursor,
//! - a per-run timeout; the per-page cursor checkpoint keeps a timed-out
//!   run resumable from where it stopped.
//!
//! The per-account lock is taken before an admission permit, so a
//! notification queued behind an in-flight run for the same account does
//! not occupy a slot another account could use. Spawned runs are tracked;
//! [`Dispatcher::drain`] lets shutdown wait for them to checkpoint.
//!
//! Run results never reach the HTTP caller; they are logged here.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use sitesync_core::domain::AccountId;
use sitesync_core::ports::{ChangeSource, CursorStore, ObjectStore, TenantDirectory};
use sitesync_core::usecases::SyncAccount;

/// Builds a `ChangeSource` for one account's access token.
pub type SourceFactory = Arc<dyn Fn(&str) -> Arc<dyn ChangeSource> + Send + Sync>;

/// Spawns and supervises sync runs triggered by notifications
pub struct Dispatcher {
    sources: SourceFactory,
    cursors: Arc<dyn CursorStore>,
    tenants: Arc<dyn TenantDirectory>,
    objects: Arc<dyn ObjectStore>,
    permits: Arc<Semaphore>,
    account_locks: DashMap<i64, Arc<Mutex<()>>>,
    tracker: TaskTracker,
    run_timeout: Duration,
    shutdown: CancellationToken,
}

impl Dispatcher {
    pub fn new(
        sources: SourceFactory,
        cursors: Arc<dyn CursorStore>,
        tenants: Arc<dyn TenantDirectory>,
        objects: Arc<dyn ObjectStore>,
        max_concurrent_runs: usize,
        run_timeout: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            sources,
            cursors,
            tenants,
            objects,
            permits: Arc::new(Semaphore::new(max_concurrent_runs)),
            account_locks: DashMap::new(),
            tracker: TaskTracker::new(),
            run_timeout,
            shutdown,
        }
    }

    /// Spawns one tracked run per account; results are logged, not returned.
    pub fn dispatch(self: &Arc<Self>, accounts: Vec<AccountId>) {
        for account in accounts {
            let dispatcher = Arc::clone(self);
            self.tracker.spawn(async move {
                dispatcher.run_account(account).await;
            });
        }
    }

    /// Waits for every dispatched run to finish. Called once at shutdown,
    /// after the listener has stopped accepting notifications.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }

    /// Executes one account's run under the per-account lock, admission
    /// control, and the run timeout.
    pub(crate) async fn run_account(&self, account: AccountId) {
        let lock = self
            .account_locks
            .entry(account.as_i64())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock().await;
        self.admitted_run(account).await;
        drop(guard);
        drop(lock);

        // The map entry stays only while some run holds or awaits the lock.
        self.account_locks
            .remove_if(&account.as_i64(), |_, lock| Arc::strong_count(lock) == 1);
    }

    /// The body of a run; the caller already holds the account lock.
    async fn admitted_run(&self, account: AccountId) {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            // Closed only during teardown.
            Err(_) => return,
        };

        if self.shutdown.is_cancelled() {
            debug!(%account, "skipping run, shutting down");
            return;
        }

        let token = match self.tenants.access_token(account).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!(%account, "no access token on file, ignoring notification");
                return;
            }
            Err(err) => {
                error!(%account, error = %err, "token lookup failed");
                return;
            }
        };

        let usecase = SyncAccount::new(
            (self.sources)(&token),
            Arc::clone(&self.cursors),
            Arc::clone(&self.tenants),
            Arc::clone(&self.objects),
        );

        match tokio::time::timeout(self.run_timeout, usecase.run(account)).await {
            Ok(Ok(outcome)) => {
                if !outcome.errors.is_empty() {
                    warn!(
                        %account,
                        errors = outcome.errors.len(),
                        "run finished with entry failures"
                    );
                }
                info!(
                    %account,
                    copied = outcome.files_copied,
                    removed = outcome.files_removed,
                    "run complete"
                );
            }
            Ok(Err(err)) => {
                error!(%account, error = %err, "run failed");
            }
            Err(_) => {
                error!(
                    %account,
                    timeout_secs = self.run_timeout.as_secs(),
                    "run timed out, will resume from last checkpoint"
                );
            }
        }
    }
}
