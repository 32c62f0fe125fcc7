// crates/rpro-bridge-core/src/core/modes.rs
// ============================================================================
// Module: SID Generation Modes
// Description: Generation policy configuration for item and style SIDs.
// Purpose: Enumerate the derivation strategies selectable per batch.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The generation policy is two independent settings read once per batch.
//! Unknown mode labels are rejected rather than mapped to a default, both by
//! serde (configuration files) and by the [`std::str::FromStr`]
//! implementations (command-line overrides).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Modes
// ============================================================================

/// Derivation strategy for item SIDs of new UPCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemSidMode {
    /// Seed from the numeric UPC.
    #[default]
    Upc,
    /// Seed from the numeric ALU when the record carries one, else the UPC.
    Alu,
    /// Seed from the clock and a random counter.
    Random,
}

/// Derivation strategy for style SIDs of new descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StyleSidMode {
    /// Seed from description 1.
    #[default]
    Desc1,
    /// Seed from description 1 followed by description 2.
    Both,
    /// Seed from the clock and a random counter.
    Random,
}

/// Generation policy snapshot applied uniformly to one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidGeneratorConfig {
    /// Item SID derivation strategy.
    #[serde(default)]
    pub item_sid_mode: ItemSidMode,
    /// Style SID derivation strategy.
    #[serde(default)]
    pub style_sid_mode: StyleSidMode,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Error returned when a mode label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} mode: {value}")]
pub struct UnknownModeError {
    /// Mode family label (`item_sid` or `style_sid`).
    pub kind: &'static str,
    /// Rejected input value.
    pub value: String,
}

impl FromStr for ItemSidMode {
    type Err = UnknownModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "upc" => Ok(Self::Upc),
            "alu" => Ok(Self::Alu),
            "random" => Ok(Self::Random),
            other => Err(UnknownModeError {
                kind: "item_sid",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for StyleSidMode {
    type Err = UnknownModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "desc1" => Ok(Self::Desc1),
            "both" => Ok(Self::Both),
            "random" => Ok(Self::Random),
            other => Err(UnknownModeError {
                kind: "style_sid",
                value: other.to_string(),
            }),
        }
    }
}
