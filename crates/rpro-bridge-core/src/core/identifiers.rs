// crates/rpro-bridge-core/src/core/identifiers.rs
// ============================================================================
// Module: RPro Bridge Identifiers
// Description: Business-unit scope identifier used to partition lookups.
// Purpose: Provide a strongly typed, serializable scope with a stable string form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The inventory system partitions every record by subsidiary number
//! (`sbs_no`). Lookups against the relational store are always issued under
//! one [`ScopeId`]. The identifier is opaque; it serializes as a string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Default subsidiary scope used when none is configured.
pub const DEFAULT_SCOPE: &str = "001";

/// Business-unit scope (subsidiary number) for store lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(String);

impl ScopeId {
    /// Creates a new scope identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScopeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
