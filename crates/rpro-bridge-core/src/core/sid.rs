// crates/rpro-bridge-core/src/core/sid.rs
// ============================================================================
// Module: SID Codec
// Description: Bit-packing transform from a 64-bit seed to a system identifier.
// Purpose: Produce identifiers whose bit layout matches the inventory system.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The inventory system stores item and style identifiers (SIDs) as signed
//! 64-bit integers with a fixed internal layout: the three low bits of the
//! first byte are a tag carried over from the seed, the seed body is shifted
//! five bits left, and the top bits of the seed are dropped. [`encode_sid`]
//! reproduces that layout exactly; the masks are a compatibility requirement.
//!
//! ## Invariants
//! - The transform is total and pure; equal seeds yield equal SIDs.
//! - The low three bits of byte 0 always equal those of the seed.
//! - Bits 3 and 4 are always clear and the sign bit is never set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Mask selecting the tag bits carried over from byte 0 of the seed.
const TAG_MASK: u8 = 0x07;
/// Mask clearing the tag bits from byte 0.
const BODY_MASK: u8 = 0xF8;
/// Mask applied to byte 7 of the seed before scaling.
const HIGH_BYTE_MASK: u8 = 0x03;
/// Scaling factor applied to the masked seed (a five-bit shift).
const SCALE: u64 = 0x20;

// ============================================================================
// SECTION: SID Type
// ============================================================================

/// Signed 64-bit identifier used as a primary key by the inventory system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sid(i64);

impl Sid {
    /// Wraps a raw identifier value, typically read back from the store.
    #[must_use]
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw signed value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the identifier as little-endian bytes.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Sid> for i64 {
    fn from(value: Sid) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Encodes a seed into a well-formed SID.
///
/// The seed is laid out little-endian, its tag bits are set aside, the body
/// and the high byte are masked, the result is scaled by 32 with wraparound,
/// and the tag bits are restored into byte 0.
#[must_use]
pub const fn encode_sid(seed: u64) -> Sid {
    let mut bytes = seed.to_le_bytes();
    let tag = bytes[0] & TAG_MASK;
    bytes[0] &= BODY_MASK;
    bytes[7] &= HIGH_BYTE_MASK;
    let scaled = u64::from_le_bytes(bytes).wrapping_mul(SCALE);
    let mut bytes = scaled.to_le_bytes();
    bytes[0] = (bytes[0] & BODY_MASK) | tag;
    Sid(i64::from_le_bytes(bytes))
}
