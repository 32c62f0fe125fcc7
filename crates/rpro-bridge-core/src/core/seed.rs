// crates/rpro-bridge-core/src/core/seed.rs
// ============================================================================
// Module: SID Seed Derivation
// Description: Seed strategies feeding the SID codec.
// Purpose: Derive deterministic seeds from UPCs and descriptions, plus time seeds.
// Dependencies: sha2, thiserror
// ============================================================================

//! ## Overview
//! Every generated SID is `encode_sid(seed)`; this module owns the seeds.
//!
//! - UPC (and ALU) seeds parse the business key as a base-10 integer.
//! - Description seeds hash the first [`DESCRIPTION_SEED_CHARS`] characters
//!   with SHA-256 and reduce the leading eight digest bytes modulo 10^18.
//! - Random seeds concatenate a 12-digit millisecond clock reading with a
//!   4-digit counter. The clock and counter are supplied by the caller so the
//!   path stays testable; see [`crate::interfaces::EntropySource`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::sid::Sid;
use crate::core::sid::encode_sid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of leading characters of a description that feed the hash.
pub const DESCRIPTION_SEED_CHARS: usize = 19;
/// Modulus applied to the signed digest prefix.
const DESCRIPTION_MODULUS: i64 = 1_000_000_000_000_000_000;
/// Modulus keeping the millisecond clock to twelve decimal digits.
const CLOCK_MODULUS: u64 = 1_000_000_000_000;
/// Decimal width reserved for the random counter.
const COUNTER_SPAN: u64 = 10_000;
/// Largest counter value accepted by [`random_seed`].
pub const MAX_COUNTER: u16 = 9_999;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while deriving a seed from a business key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The business key is not a base-10 integer.
    #[error("sid seed error: '{value}' is not a base-10 integer")]
    InvalidNumber {
        /// Offending input value.
        value: String,
    },
}

// ============================================================================
// SECTION: Seed Strategies
// ============================================================================

/// Parses a numeric business key (UPC or ALU) into a seed.
///
/// Surrounding whitespace and a leading sign are accepted. Values wider than
/// 64 bits keep their low 64 bits; negative values use two's complement.
///
/// # Errors
///
/// Returns [`SeedError::InvalidNumber`] when the key is empty, contains a
/// non-digit, or exceeds the 128-bit parse range.
pub fn seed_from_upc(upc: &str) -> Result<u64, SeedError> {
    let trimmed = upc.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid_number(upc));
    }
    let value: i128 = trimmed.parse().map_err(|_| invalid_number(upc))?;
    let low = value.to_le_bytes();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&low[.. 8]);
    Ok(u64::from_le_bytes(bytes))
}

/// Derives a seed from the leading characters of a description.
#[must_use]
pub fn seed_from_description(description: &str) -> u64 {
    let truncated: String = description.chars().take(DESCRIPTION_SEED_CHARS).collect();
    let digest = Sha256::digest(truncated.as_bytes());
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[.. 8]);
    let reduced = i64::from_le_bytes(prefix) % DESCRIPTION_MODULUS;
    u64::from_le_bytes(reduced.to_le_bytes())
}

/// Derives a seed from two descriptions concatenated without a separator.
///
/// Truncation applies to the concatenation, not to each part.
#[must_use]
pub fn seed_from_descriptions(description1: &str, description2: &str) -> u64 {
    let mut joined = String::with_capacity(description1.len() + description2.len());
    joined.push_str(description1);
    joined.push_str(description2);
    seed_from_description(&joined)
}

/// Builds the time-based seed `CCCCCCCCCCCCNNNN` from a clock reading and counter.
///
/// The clock contributes its value modulo 10^12 and the counter is clamped to
/// [`MAX_COUNTER`].
#[must_use]
pub fn random_seed(unix_millis: u64, counter: u16) -> u64 {
    let clock = unix_millis % CLOCK_MODULUS;
    let counter = u64::from(counter.min(MAX_COUNTER));
    clock * COUNTER_SPAN + counter
}

// ============================================================================
// SECTION: SID Conveniences
// ============================================================================

/// Generates an item SID from a UPC.
///
/// # Errors
///
/// Returns [`SeedError`] when the UPC is not numeric.
pub fn sid_from_upc(upc: &str) -> Result<Sid, SeedError> {
    seed_from_upc(upc).map(encode_sid)
}

/// Generates a style SID from a single description.
#[must_use]
pub fn sid_from_desc(description: &str) -> Sid {
    encode_sid(seed_from_description(description))
}

/// Generates a style SID from two descriptions.
#[must_use]
pub fn sid_from_both(description1: &str, description2: &str) -> Sid {
    encode_sid(seed_from_descriptions(description1, description2))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an invalid-number error for the raw input.
fn invalid_number(value: &str) -> SeedError {
    SeedError::InvalidNumber {
        value: value.to_string(),
    }
}
