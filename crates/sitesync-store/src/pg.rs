//! Postgres-backed tenant directory
//!
//! Reads the `users` and `sites` tables owned by the surrounding web
//! application. This crate never writes to them.
//!
//! Schema assumed:
//! - `users(id, dropbox_user_id, token, ...)`
//! - `sites(user_id, domain, ...)`

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use sitesync_core::config::DatabaseConfig;
use sitesync_core::domain::{AccountId, SyncError};
use sitesync_core::ports::TenantDirectory;

/// Tenant directory backed by the application's Postgres database
pub struct PgTenantDirectory {
    pool: PgPool,
}

impl PgTenantDirectory {
    /// Connects a small pool using the configured connection string.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SyncError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.connection_string())
            .await
            .map_err(|e| SyncError::Store(format!("postgres connect failed: {e}")))?;
        debug!(host = %config.host, "connected to postgres");
        Ok(Self { pool })
    }

    /// Wraps an existing pool, for tests.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDirectory for PgTenantDirectory {
    async fn access_token(&self, account: AccountId) -> Result<Option<String>, SyncError> {
        sqlx::query_scalar::<_, String>("SELECT token FROM users WHERE dropbox_user_id = $1")
            .bind(account.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SyncError::Store(format!("token lookup for {account} failed: {e}")))
    }

    async fn owns_domain(&self, account: AccountId, domain: &str) -> Result<bool, SyncError> {
        let row = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users JOIN sites ON users.id = sites.user_id \
             WHERE users.dropbox_user_id = $1 AND sites.domain = $2",
        )
        .bind(account.as_i64())
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            SyncError::Store(format!(
                "ownership lookup for {account}/{domain} failed: {e}"
            ))
        })?;

        Ok(row.is_some())
    }
}
