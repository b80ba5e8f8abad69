//! Tenant directory port (driven/secondary port)
//!
//! Read-only view of the relational store that maps upstream accounts to
//! access credentials and to the site domains they own.

use crate::domain::{AccountId, SyncError};

/// Credential lookup and domain-ownership checks for tenant accounts
#[async_trait::async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Returns the upstream access token for an account, or `None` when
    /// the account is unknown.
    async fn access_token(&self, account: AccountId) -> Result<Option<String>, SyncError>;

    /// Returns true iff `domain` (a path's first segment) is owned by
    /// `account`. One blocking query per call; callers should only invoke
    /// this for entries that actually have a domain.
    async fn owns_domain(&self, account: AccountId, domain: &str) -> Result<bool, SyncError>;
}
