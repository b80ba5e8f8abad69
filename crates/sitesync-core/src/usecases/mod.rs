//! Use cases orchestrating domain logic through port interfaces

mod sync_account;

pub use sync_account::{SyncAccount, SyncOutcome};
