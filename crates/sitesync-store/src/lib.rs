//! SiteSync Store - persistence adapters
//!
//! Implements the two read/write seams of the service:
//! - [`pg`] - `TenantDirectory` against the web application's Postgres
//!   database (access tokens and site ownership, read-only)
//! - [`redis`] - `CursorStore` as a Redis hash keyed by account id

pub mod pg;
pub mod redis;

pub use self::pg::PgTenantDirectory;
pub use self::redis::RedisCursorStore;
