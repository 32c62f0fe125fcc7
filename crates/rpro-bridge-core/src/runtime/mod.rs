// crates/rpro-bridge-core/src/runtime/mod.rs
// ============================================================================
// Module: RPro Bridge Runtime
// Description: Resolution policy, entropy sources, and document batches.
// Purpose: Turn validated input lines into inventory-system documents.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the SID resolution policy and the inventory and
//! transfer-order batches built on it. Batches run sequentially over one
//! lookup session and abort on the first failure.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod batch;
pub mod entropy;
pub mod inventory;
pub mod resolver;
pub mod store;
pub mod transfer_order;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use batch::BatchContext;
pub use batch::BatchDocument;
pub use batch::BatchError;
pub use batch::DEFAULT_DELIMITER;
pub use entropy::FixedEntropy;
pub use entropy::SystemEntropy;
pub use entropy::sid_random;
pub use inventory::InventoryBatch;
pub use resolver::ResolveError;
pub use resolver::SidResolver;
pub use store::InMemoryItem;
pub use store::InMemoryLookupStore;
pub use transfer_order::TransferOrderBatch;
