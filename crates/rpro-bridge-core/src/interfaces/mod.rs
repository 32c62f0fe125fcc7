// crates/rpro-bridge-core/src/interfaces/mod.rs
// ============================================================================
// Module: RPro Bridge Interfaces
// Description: Collaborator contracts for store lookups and entropy.
// Purpose: Define the seams the resolution policy and batch builders call.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The core never talks to a database directly. Existing identifiers and
//! reference data are read through [`SidLookup`] and [`ReferenceLookup`];
//! time-based seeds read the clock and a random draw through
//! [`EntropySource`]. Every lookup is synchronous, exact-match, and scoped by
//! a [`ScopeId`]. Implementations must surface failures instead of reporting
//! a miss.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ScopeId;
use crate::core::sid::Sid;

// ============================================================================
// SECTION: Lookup Errors
// ============================================================================

/// Lookup collaborator errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant is fatal to the enclosing batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Store connectivity or I/O error.
    #[error("lookup store io error: {0}")]
    Io(String),
    /// Query failed.
    #[error("lookup store query error: {0}")]
    Query(String),
    /// Stored data is corrupted.
    #[error("lookup store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("lookup store version mismatch: {0}")]
    VersionMismatch(String),
    /// Request or stored data is invalid.
    #[error("lookup store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: SID Lookup
// ============================================================================

/// Identifier pair stored for an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItemStyle {
    /// Stored style SID.
    pub style_sid: Sid,
    /// Stored item SID.
    pub item_sid: Sid,
}

/// Existing-identifier lookups used by the resolution policy.
pub trait SidLookup {
    /// Looks up the stored (style, item) pair for a UPC.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn lookup_item_style(
        &self,
        scope: &ScopeId,
        upc: &str,
    ) -> Result<Option<StoredItemStyle>, LookupError>;

    /// Looks up the stored style SID for a description 1.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn lookup_style_by_description(
        &self,
        scope: &ScopeId,
        description1: &str,
    ) -> Result<Option<Sid>, LookupError>;

    /// Reports store readiness before a batch starts.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), LookupError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Reference Lookup
// ============================================================================

/// Stored attributes of an existing item, used by transfer orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    /// Stored style SID.
    pub style_sid: Sid,
    /// Stored item SID.
    pub item_sid: Sid,
    /// Item cost in its stored textual form.
    pub cost: Option<String>,
    /// Item tax code.
    pub tax_code: Option<String>,
    /// Item DCS code.
    pub dcs_code: Option<String>,
    /// Item vendor code.
    pub vend_code: Option<String>,
}

/// Reference-data lookups used by batch builders.
pub trait ReferenceLookup {
    /// Returns true when the DCS code exists in scope.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn dcs_exists(&self, scope: &ScopeId, dcs_code: &str) -> Result<bool, LookupError>;

    /// Returns true when the vendor code exists in scope.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn vendor_exists(&self, scope: &ScopeId, vend_code: &str) -> Result<bool, LookupError>;

    /// Returns the tax code stored for a DCS code.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn dcs_tax_code(&self, scope: &ScopeId, dcs_code: &str)
    -> Result<Option<String>, LookupError>;

    /// Returns the stored detail of an item by UPC.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the query fails.
    fn item_detail(&self, scope: &ScopeId, upc: &str) -> Result<Option<ItemDetail>, LookupError>;

    /// Reports store readiness before a reference-only batch starts.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), LookupError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Entropy
// ============================================================================

/// Clock and random-draw source for time-based seeds.
pub trait EntropySource {
    /// Returns the current Unix time in milliseconds.
    fn unix_millis(&self) -> u64;

    /// Returns a random counter in `[0, 9999]`.
    fn counter(&self) -> u16;
}
