// crates/rpro-bridge-core/tests/sid_codec.rs
// ============================================================================
// Module: SID Codec Tests
// Description: Known vectors and bit-layout properties of the SID codec.
// Purpose: Pin the encoding bit-for-bit and check its layout over all seeds.
// Dependencies: rpro-bridge-core, proptest
// ============================================================================
//! ## Overview
//! Known-answer vectors pin the exact transform; property tests check the
//! preserved tag bits, the cleared bits, and determinism across the full
//! `u64` range.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use rpro_bridge_core::Sid;
use rpro_bridge_core::encode_sid;

#[test]
fn zero_seed_is_a_fixed_point() {
    assert_eq!(encode_sid(0).get(), 0);
    assert_eq!(encode_sid(0).to_le_bytes(), [0_u8; 8]);
}

#[test]
fn tag_only_seeds_encode_to_themselves() {
    for seed in 0 ..= 7_u64 {
        assert_eq!(encode_sid(seed).get(), i64::try_from(seed).unwrap());
    }
}

#[test]
fn known_vectors_match() {
    let vectors: [(u64, i64); 7] = [
        (0xF7, 7_687),
        (0xFF, 7_943),
        (u64::MAX, 9_223_372_036_854_775_559),
        (1_234_567_890_123, 39_506_172_483_843),
        (12_345_678_905, 395_061_724_929),
        (0x0123_4567_89AB_CDEF, 2_623_536_934_927_580_423),
        (0x8000_0000_0000_0000, 0),
    ];
    for (seed, expected) in vectors {
        assert_eq!(encode_sid(seed).get(), expected, "seed {seed:#x}");
    }
}

#[test]
fn low_bits_of_0xf7_are_preserved() {
    let sid = encode_sid(0xF7);
    assert_eq!(sid.to_le_bytes()[0] & 0x07, 0b111);
}

#[test]
fn sid_displays_as_decimal() {
    assert_eq!(encode_sid(0xFF).to_string(), "7943");
    assert_eq!(Sid::from_raw(-12).to_string(), "-12");
    assert_eq!(i64::from(Sid::from_raw(42)), 42);
}

#[test]
fn sid_serializes_as_plain_integer() {
    let json = serde_json::to_string(&encode_sid(0xFF)).unwrap();
    assert_eq!(json, "7943");
    let parsed: Sid = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, encode_sid(0xFF));
}

proptest! {
    #[test]
    fn tag_bits_are_preserved(seed in any::<u64>()) {
        let sid = encode_sid(seed);
        prop_assert_eq!(sid.to_le_bytes()[0] & 0x07, seed.to_le_bytes()[0] & 0x07);
    }

    #[test]
    fn reserved_bits_are_clear(seed in any::<u64>()) {
        let bytes = encode_sid(seed).to_le_bytes();
        prop_assert_eq!(bytes[0] & 0x18, 0);
        prop_assert!(encode_sid(seed).get() >= 0);
    }

    #[test]
    fn encoding_matches_shift_form(seed in any::<u64>()) {
        let expected = ((seed & 0x03FF_FFFF_FFFF_FFF8) << 5) | (seed & 0x07);
        prop_assert_eq!(encode_sid(seed).get(), i64::try_from(expected).unwrap());
    }

    #[test]
    fn encoding_is_deterministic(seed in any::<u64>()) {
        prop_assert_eq!(encode_sid(seed), encode_sid(seed));
    }
}
