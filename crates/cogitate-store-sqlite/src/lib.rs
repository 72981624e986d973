// cogitate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Cogitate SQLite Store Library
// Description: Public API surface for the durable ThoughtStore backend.
// Purpose: Expose `SqliteThoughtStore` and its configuration types.
// Dependencies: cogitate-core, rusqlite
// ============================================================================

//! ## Overview
//! A drop-in, file-backed alternative to
//! `cogitate_core::InMemoryThoughtStore`, selected at construction time from
//! configuration. Implements the same [`cogitate_core::ThoughtStore`]
//! contract; callers never need to know which backend they hold.

pub mod store;

pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteThoughtStore;
