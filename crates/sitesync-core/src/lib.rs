//! SiteSync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `AccountId`, `Cursor`, `SitePath`, `ChangeEntry`, `DeltaPage`
//! - **Use cases** - `SyncAccount`, the per-account replication run
//! - **Port definitions** - Traits for adapters: `ChangeSource`, `CursorStore`,
//!   `TenantDirectory`, `ObjectStore`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
