// crates/rpro-bridge-core/tests/resolution.rs
// ============================================================================
// Module: Resolution Policy Tests
// Description: Tests for the per-record reuse-or-generate decision.
// Purpose: Validate reuse precedence, item/style independence, and modes.
// Dependencies: rpro-bridge-core
// ============================================================================
//! ## Overview
//! Drives `SidResolver` against the in-memory store with fixed entropy so
//! every branch of the policy yields an exact, assertable SID pair.

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

use rpro_bridge_core::FixedEntropy;
use rpro_bridge_core::InMemoryItem;
use rpro_bridge_core::InMemoryLookupStore;
use rpro_bridge_core::InventoryRecord;
use rpro_bridge_core::ItemSidMode;
use rpro_bridge_core::LookupError;
use rpro_bridge_core::ResolveError;
use rpro_bridge_core::ScopeId;
use rpro_bridge_core::Sid;
use rpro_bridge_core::SidGeneratorConfig;
use rpro_bridge_core::SidResolver;
use rpro_bridge_core::SidSource;
use rpro_bridge_core::StyleSidMode;
use rpro_bridge_core::UnknownModeError;
use rpro_bridge_core::sid_from_both;
use rpro_bridge_core::sid_from_desc;
use rpro_bridge_core::sid_from_upc;

/// Entropy pinned so random modes produce a known SID.
const ENTROPY: FixedEntropy = FixedEntropy::new(1_700_000_000_123, 42);
/// SID produced by `ENTROPY`.
const RANDOM_SID: i64 = 224_000_000_039_361_282;

fn scope() -> ScopeId {
    ScopeId::new("001")
}

fn config(item_sid_mode: ItemSidMode, style_sid_mode: StyleSidMode) -> SidGeneratorConfig {
    SidGeneratorConfig {
        item_sid_mode,
        style_sid_mode,
    }
}

fn store_with_existing_item() -> InMemoryLookupStore {
    let store = InMemoryLookupStore::new();
    store
        .insert_item(InMemoryItem::new(
            scope(),
            "012345678905",
            "ACME WIDGET",
            Sid::from_raw(111),
            Sid::from_raw(222),
        ))
        .unwrap();
    store
}

// ============================================================================
// SECTION: Reuse Precedence
// ============================================================================

#[test]
fn existing_upc_is_reused_under_every_mode() {
    let store = store_with_existing_item();
    let record = InventoryRecord::new("012345678905", "SOMETHING ELSE", "");
    for item_mode in [ItemSidMode::Upc, ItemSidMode::Alu, ItemSidMode::Random] {
        for style_mode in [StyleSidMode::Desc1, StyleSidMode::Both, StyleSidMode::Random] {
            let resolver =
                SidResolver::new(&store, &ENTROPY, scope(), config(item_mode, style_mode));
            let resolution = resolver.resolve(&record).unwrap();
            assert_eq!(resolution.item_sid, Sid::from_raw(222));
            assert_eq!(resolution.style_sid, Sid::from_raw(111));
            assert!(resolution.is_reuse());
        }
    }
}

#[test]
fn reuse_issues_a_single_lookup() {
    let store = store_with_existing_item();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    resolver.resolve(&InventoryRecord::new("012345678905", "ACME WIDGET", "")).unwrap();
    assert_eq!(store.lookup_count().unwrap(), 1);
}

#[test]
fn lookups_are_scoped() {
    let store = store_with_existing_item();
    let resolver =
        SidResolver::new(&store, &ENTROPY, ScopeId::new("002"), SidGeneratorConfig::default());
    let resolution =
        resolver.resolve(&InventoryRecord::new("012345678905", "ACME WIDGET", "")).unwrap();
    assert!(!resolution.item_source.is_existing());
    assert!(!resolution.style_source.is_existing());
    assert_eq!(resolution.item_sid, sid_from_upc("012345678905").unwrap());
}

// ============================================================================
// SECTION: Independent Style Resolution
// ============================================================================

#[test]
fn new_item_attaches_to_existing_style() {
    let store = store_with_existing_item();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    let resolution =
        resolver.resolve(&InventoryRecord::new("1234567890123", "ACME WIDGET", "")).unwrap();
    assert_eq!(resolution.style_sid, Sid::from_raw(111));
    assert_eq!(resolution.style_source, SidSource::Existing);
    assert_eq!(resolution.item_sid.get(), 39_506_172_483_843);
    assert_eq!(resolution.item_source, SidSource::GeneratedItem(ItemSidMode::Upc));
    assert!(!resolution.is_reuse());
}

#[test]
fn earliest_style_wins_for_shared_description() {
    let store = store_with_existing_item();
    store
        .insert_item(InMemoryItem::new(
            scope(),
            "999",
            "ACME WIDGET",
            Sid::from_raw(333),
            Sid::from_raw(444),
        ))
        .unwrap();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    let resolution = resolver.resolve(&InventoryRecord::new("55", "ACME WIDGET", "")).unwrap();
    assert_eq!(resolution.style_sid, Sid::from_raw(111));
}

#[test]
fn style_lookup_ignores_description2() {
    let store = store_with_existing_item();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Upc, StyleSidMode::Both),
    );
    let resolution =
        resolver.resolve(&InventoryRecord::new("77", "ACME WIDGET", "BLUE")).unwrap();
    assert_eq!(resolution.style_sid, Sid::from_raw(111));
}

// ============================================================================
// SECTION: Generation Modes
// ============================================================================

#[test]
fn default_modes_use_upc_and_description1() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    let resolution =
        resolver.resolve(&InventoryRecord::new("1234567890123", "ACME WIDGET", "X")).unwrap();
    assert_eq!(resolution.item_sid.get(), 39_506_172_483_843);
    assert_eq!(resolution.style_sid.get(), 6_449_892_077_830_374_406);
    assert_eq!(resolution.style_source, SidSource::GeneratedStyle(StyleSidMode::Desc1));
    assert_eq!(store.lookup_count().unwrap(), 2);
}

#[test]
fn both_mode_hashes_the_concatenation() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Upc, StyleSidMode::Both),
    );
    let resolution =
        resolver.resolve(&InventoryRecord::new("1", "RED SHIRT", "SIZE M")).unwrap();
    assert_eq!(resolution.style_sid, sid_from_both("RED SHIRT", "SIZE M"));
    assert_eq!(resolution.style_sid, sid_from_desc("RED SHIRTSIZE M"));
}

#[test]
fn random_modes_use_the_entropy_source() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Random, StyleSidMode::Random),
    );
    let resolution = resolver.resolve(&InventoryRecord::new("ABC", "X", "Y")).unwrap();
    assert_eq!(resolution.item_sid.get(), RANDOM_SID);
    assert_eq!(resolution.style_sid.get(), RANDOM_SID);
    assert_eq!(resolution.item_source.label(), "generated:random");
}

#[test]
fn alu_mode_seeds_from_alu_when_present() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Alu, StyleSidMode::Desc1),
    );
    let with_alu = InventoryRecord::new("1234567890123", "X", "").with_alu("012345678905");
    let resolution = resolver.resolve(&with_alu).unwrap();
    assert_eq!(resolution.item_sid.get(), 395_061_724_929);
    assert_eq!(resolution.item_source, SidSource::GeneratedItem(ItemSidMode::Alu));

    let blank_alu = InventoryRecord::new("1234567890123", "X", "").with_alu("  ");
    let resolution = resolver.resolve(&blank_alu).unwrap();
    assert_eq!(resolution.item_sid.get(), 39_506_172_483_843);
    assert_eq!(resolution.item_source, SidSource::GeneratedItem(ItemSidMode::Upc));
}

#[test]
fn alu_mode_still_looks_up_by_upc() {
    let store = store_with_existing_item();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Alu, StyleSidMode::Desc1),
    );
    let record = InventoryRecord::new("012345678905", "X", "").with_alu("777");
    assert!(resolver.resolve(&record).unwrap().is_reuse());
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn non_numeric_upc_fails_generation() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    let err = resolver.resolve(&InventoryRecord::new("ABC", "X", "")).unwrap_err();
    assert!(matches!(err, ResolveError::Seed(_)));
}

#[test]
fn non_numeric_upc_is_fine_in_random_mode() {
    let store = InMemoryLookupStore::new();
    let resolver = SidResolver::new(
        &store,
        &ENTROPY,
        scope(),
        config(ItemSidMode::Random, StyleSidMode::Desc1),
    );
    assert!(resolver.resolve(&InventoryRecord::new("ABC", "X", "")).is_ok());
}

#[test]
fn lookup_failure_is_returned_without_retry() {
    let store = InMemoryLookupStore::new();
    store.fail_with(LookupError::Io("connection reset".to_string())).unwrap();
    let resolver = SidResolver::new(&store, &ENTROPY, scope(), SidGeneratorConfig::default());
    let err = resolver.resolve(&InventoryRecord::new("1", "X", "")).unwrap_err();
    assert_eq!(err, ResolveError::Lookup(LookupError::Io("connection reset".to_string())));
    assert_eq!(store.lookup_count().unwrap(), 1);
}

#[test]
fn mode_labels_parse_and_unknown_labels_are_rejected() {
    assert_eq!("alu".parse::<ItemSidMode>().unwrap(), ItemSidMode::Alu);
    assert_eq!("random".parse::<StyleSidMode>().unwrap(), StyleSidMode::Random);
    assert_eq!(
        "UPC".parse::<ItemSidMode>().unwrap_err(),
        UnknownModeError {
            kind: "item_sid",
            value: "UPC".to_string(),
        }
    );
    let err = "desc2".parse::<StyleSidMode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown style_sid mode: desc2");
}
