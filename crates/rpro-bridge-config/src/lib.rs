// crates/rpro-bridge-config/src/lib.rs
// ============================================================================
// Module: RPro Bridge Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for rpro-bridge.toml semantics.
// Dependencies: rpro-bridge-core, rpro-bridge-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `rpro-bridge-config` defines the configuration model for the bridge: scope,
//! delimited input settings, SID generation modes, the lookup database, field
//! catalogs and templates, and audit output. Loading is strict and fails
//! closed; batches take an immutable snapshot of the loaded value.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
