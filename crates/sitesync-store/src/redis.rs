//! Redis-backed cursor store
//!
//! All cursors live in one hash named `cursors`, keyed by the decimal
//! account id. The connection manager reconnects transparently; a failed
//! command still surfaces as a store error for the current run.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use sitesync_core::config::CursorStoreConfig;
use sitesync_core::domain::{AccountId, Cursor, SyncError};
use sitesync_core::ports::CursorStore;

/// Hash holding one cursor per account
const CURSOR_HASH: &str = "cursors";

/// Cursor store backed by a Redis hash
pub struct RedisCursorStore {
    manager: ConnectionManager,
}

impl RedisCursorStore {
    /// Opens a managed connection to the configured Redis instance.
    pub async fn connect(config: &CursorStoreConfig) -> Result<Self, SyncError> {
        let client = redis::Client::open(config.url())
            .map_err(|e| SyncError::Store(format!("redis client failed: {e}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| SyncError::Store(format!("redis connect failed: {e}")))?;
        debug!(host = %config.host, "connected to redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl CursorStore for RedisCursorStore {
    async fn get(&self, account: AccountId) -> Result<Option<Cursor>, SyncError> {
        let mut conn = self.manager.clone();
        let stored: Option<String> = conn
            .hget(CURSOR_HASH, account.to_string())
            .await
            .map_err(|e| SyncError::Store(format!("cursor read for {account} failed: {e}")))?;

        match stored {
            None => Ok(None),
            Some(raw) => {
                // An empty stored value is treated as absent rather than
                // poisoning every later run.
                if raw.is_empty() {
                    return Ok(None);
                }
                let cursor = Cursor::try_from(raw)
                    .map_err(|e| SyncError::Store(format!("stored cursor invalid: {e}")))?;
                Ok(Some(cursor))
            }
        }
    }

    async fn set(&self, account: AccountId, cursor: &Cursor) -> Result<(), SyncError> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .hset(CURSOR_HASH, account.to_string(), cursor.as_str())
            .await
            .map_err(|e| SyncError::Store(format!("cursor write for {account} failed: {e}")))?;
        Ok(())
    }
}
