// crates/rpro-bridge-core/src/core/record.rs
// ============================================================================
// Module: Resolution Records
// Description: Per-record resolution inputs and outcomes.
// Purpose: Carry the business keys into resolution and the SID pair out of it.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`InventoryRecord`] holds the business keys the resolution policy reads:
//! the UPC keys the item, description 1 keys the style. A [`Resolution`]
//! records the resolved pair together with where each half came from; item
//! and style resolve independently, so the two sources may differ.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::modes::ItemSidMode;
use crate::core::modes::StyleSidMode;
use crate::core::sid::Sid;

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Business keys of one incoming inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Item barcode; the item lookup key.
    pub upc: String,
    /// Optional alternate lookup code, used as a seed source in `alu` mode.
    #[serde(default)]
    pub alu: Option<String>,
    /// Primary description; the style lookup key.
    pub description1: String,
    /// Secondary description, used by the `both` style mode.
    #[serde(default)]
    pub description2: String,
}

impl InventoryRecord {
    /// Creates a record from its UPC and descriptions.
    #[must_use]
    pub fn new(
        upc: impl Into<String>,
        description1: impl Into<String>,
        description2: impl Into<String>,
    ) -> Self {
        Self {
            upc: upc.into(),
            alu: None,
            description1: description1.into(),
            description2: description2.into(),
        }
    }

    /// Attaches an ALU value.
    #[must_use]
    pub fn with_alu(mut self, alu: impl Into<String>) -> Self {
        self.alu = Some(alu.into());
        self
    }

    /// Returns the ALU when present and non-blank.
    #[must_use]
    pub fn alu_key(&self) -> Option<&str> {
        self.alu.as_deref().map(str::trim).filter(|value| !value.is_empty())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Provenance of one resolved SID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "mode", rename_all = "snake_case")]
pub enum SidSource {
    /// Taken from an existing store record.
    Existing,
    /// Generated with the given item mode.
    GeneratedItem(ItemSidMode),
    /// Generated with the given style mode.
    GeneratedStyle(StyleSidMode),
}

impl SidSource {
    /// Returns true when the SID was reused from the store.
    #[must_use]
    pub const fn is_existing(self) -> bool {
        matches!(self, Self::Existing)
    }

    /// Returns a stable label for audit output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::GeneratedItem(mode) => match mode {
                ItemSidMode::Upc => "generated:upc",
                ItemSidMode::Alu => "generated:alu",
                ItemSidMode::Random => "generated:random",
            },
            Self::GeneratedStyle(mode) => match mode {
                StyleSidMode::Desc1 => "generated:desc1",
                StyleSidMode::Both => "generated:both",
                StyleSidMode::Random => "generated:random",
            },
        }
    }
}

/// Resolved (item, style) SID pair for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Item SID.
    pub item_sid: Sid,
    /// Style SID.
    pub style_sid: Sid,
    /// Where the item SID came from.
    pub item_source: SidSource,
    /// Where the style SID came from.
    pub style_source: SidSource,
}

impl Resolution {
    /// Returns true when both halves were reused from one store record.
    #[must_use]
    pub const fn is_reuse(&self) -> bool {
        self.item_source.is_existing() && self.style_source.is_existing()
    }
}
