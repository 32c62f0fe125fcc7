// crates/rpro-bridge-core/src/runtime/entropy.rs
// ============================================================================
// Module: Entropy Sources
// Description: System and fixed implementations of the entropy interface.
// Purpose: Feed time-based SID seeds from the clock or from pinned values.
// Dependencies: crate::{core, interfaces}, rand
// ============================================================================

//! ## Overview
//! [`SystemEntropy`] reads the wall clock and draws the counter uniformly
//! from `[0, 9999]`. [`FixedEntropy`] returns pinned values so the random
//! derivation path produces exact, assertable SIDs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::Rng;

use crate::core::seed::MAX_COUNTER;
use crate::core::seed::random_seed;
use crate::core::sid::Sid;
use crate::core::sid::encode_sid;
use crate::interfaces::EntropySource;

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Entropy from the system clock and the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn unix_millis(&self) -> u64 {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }

    fn counter(&self) -> u16 {
        rand::thread_rng().gen_range(0 ..= MAX_COUNTER)
    }
}

/// Entropy pinned to a fixed clock reading and counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntropy {
    /// Clock reading returned on every call.
    unix_millis: u64,
    /// Counter returned on every call.
    counter: u16,
}

impl FixedEntropy {
    /// Creates a fixed source.
    #[must_use]
    pub const fn new(unix_millis: u64, counter: u16) -> Self {
        Self {
            unix_millis,
            counter,
        }
    }
}

impl EntropySource for FixedEntropy {
    fn unix_millis(&self) -> u64 {
        self.unix_millis
    }

    fn counter(&self) -> u16 {
        self.counter
    }
}

// ============================================================================
// SECTION: Random SIDs
// ============================================================================

/// Generates a time-based SID from an entropy source.
#[must_use]
pub fn sid_random<E: EntropySource + ?Sized>(entropy: &E) -> Sid {
    encode_sid(random_seed(entropy.unix_millis(), entropy.counter()))
}
