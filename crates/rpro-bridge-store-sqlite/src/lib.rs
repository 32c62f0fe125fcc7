// crates/rpro-bridge-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Lookup Store
// Description: SidLookup and ReferenceLookup backed by SQLite.
// Purpose: Serve existing SIDs and reference data from a relational store.
// Dependencies: rpro-bridge-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed implementation of the core lookup
//! interfaces. Batches open it read-only; a read-write mode initialises the
//! schema and accepts seeding inserts for tooling and tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SCHEMA_VERSION;
pub use store::SqliteAccessMode;
pub use store::SqliteItemRow;
pub use store::SqliteLookupConfig;
pub use store::SqliteLookupError;
pub use store::SqliteLookupStore;
