//! Webhook notification payloads
//!
//! Dropbox delivers change notifications in two shapes, depending on the
//! webhook generation the app registered for:
//!
//! - current: `{"list_folder": {"accounts": [...]}}`
//! - legacy:  `{"delta": {"users": [...]}}`
//!
//! Both are accepted; account ids arrive as JSON numbers or numeric
//! strings. The notification only says *which* accounts changed, never
//! what changed; the listing endpoints answer that.

use serde::Deserialize;

use sitesync_core::domain::{AccountId, SyncError};

#[derive(Debug, Deserialize)]
struct Notification {
    list_folder: Option<AccountList>,
    delta: Option<UserList>,
}

#[derive(Debug, Deserialize)]
struct AccountList {
    #[serde(default)]
    accounts: Vec<AccountId>,
}

#[derive(Debug, Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<AccountId>,
}

/// Parses a notification body into the accounts to synchronize.
///
/// Duplicates are dropped while preserving first-seen order. A body that
/// decodes but matches neither shape yields an empty list; undecodable
/// JSON is a bad request.
pub fn parse_notification(body: &[u8]) -> Result<Vec<AccountId>, SyncError> {
    let notification: Notification = serde_json::from_slice(body)
        .map_err(|e| SyncError::BadRequest(format!("undecodable notification: {e}")))?;

    let mut accounts: Vec<AccountId> = Vec::new();
    if let Some(list_folder) = notification.list_folder {
        accounts.extend(list_folder.accounts);
    }
    if let Some(delta) = notification.delta {
        accounts.extend(delta.users);
    }

    let mut seen = std::collections::HashSet::new();
    accounts.retain(|account| seen.insert(*account));
    Ok(accounts)
}
