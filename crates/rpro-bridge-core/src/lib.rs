// crates/rpro-bridge-core/src/lib.rs
// ============================================================================
// Module: RPro Bridge Core Library
// Description: Public API surface for the RPro Bridge core.
// Purpose: Expose SID derivation, resolution, and document building.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! RPro Bridge core turns delimited inventory and transfer-order records into
//! inventory-system documents. Its central piece is the SID codec and the
//! per-record resolution policy that reuses identifiers already known to the
//! relational store or derives new ones from configured strategies. The core
//! talks to the store only through the traits in [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::BatchAuditEvent;
pub use audit::BatchAuditSink;
pub use audit::BatchKind;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::EntropySource;
pub use interfaces::ItemDetail;
pub use interfaces::LookupError;
pub use interfaces::ReferenceLookup;
pub use interfaces::SidLookup;
pub use interfaces::StoredItemStyle;
pub use runtime::BatchContext;
pub use runtime::BatchDocument;
pub use runtime::BatchError;
pub use runtime::FixedEntropy;
pub use runtime::InMemoryItem;
pub use runtime::InMemoryLookupStore;
pub use runtime::InventoryBatch;
pub use runtime::ResolveError;
pub use runtime::SidResolver;
pub use runtime::SystemEntropy;
pub use runtime::TransferOrderBatch;
pub use runtime::sid_random;
