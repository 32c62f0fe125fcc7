// crates/rpro-bridge-core/tests/audit_log.rs
// ============================================================================
// Module: Audit Log Tests
// Description: Tests for the JSON-line file audit sink.
// Purpose: Ensure batch events land in the audit file in order and append.
// Dependencies: rpro-bridge-core, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Runs small inventory batches against a file audit sink and parses the
//! resulting JSON lines.

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

use std::fs;
use std::path::Path;

use rpro_bridge_core::BatchContext;
use rpro_bridge_core::FieldSection;
use rpro_bridge_core::FieldSpec;
use rpro_bridge_core::FileAuditSink;
use rpro_bridge_core::FixedEntropy;
use rpro_bridge_core::InMemoryItem;
use rpro_bridge_core::InMemoryLookupStore;
use rpro_bridge_core::InventoryBatch;
use rpro_bridge_core::InventoryTemplate;
use rpro_bridge_core::ScopeId;
use rpro_bridge_core::Sid;
use serde_json::Value;

const ENTROPY: FixedEntropy = FixedEntropy::new(1_700_000_000_123, 42);

fn template() -> InventoryTemplate {
    let catalog = vec![
        FieldSpec::new("local_upc", "UPC", FieldSection::InvnSbs),
        FieldSpec::new("description1", "Desc 1", FieldSection::InvnSbs),
    ];
    let codes = vec!["local_upc".to_string(), "description1".to_string()];
    InventoryTemplate::resolve(&catalog, &codes).unwrap()
}

fn store() -> InMemoryLookupStore {
    let store = InMemoryLookupStore::new();
    store
        .insert_item(InMemoryItem::new(
            ScopeId::new("001"),
            "111",
            "ACME WIDGET",
            Sid::from_raw(10),
            Sid::from_raw(20),
        ))
        .unwrap();
    store
}

fn read_events(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn file_sink_records_batch_lifecycle_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).unwrap();
    let store = store();
    let template = template();
    let context = BatchContext::new(ScopeId::new("001"), "2026-01-02T03:04:05");
    let batch = InventoryBatch::new(&store, &ENTROPY, &sink, &template, &context);
    batch.generate("111,ACME WIDGET").unwrap();
    drop(sink);

    let events = read_events(&path);
    let labels: Vec<&str> = events.iter().map(|event| event["event"].as_str().unwrap()).collect();
    assert_eq!(labels, ["batch_started", "record_resolved", "batch_completed"]);
    assert_eq!(events[0]["batch"], "inventory");
    assert_eq!(events[0]["scope"], "001");
    assert_eq!(events[1]["line"], 1);
    assert_eq!(events[1]["upc"], "111");
    assert!(events[1].get("error").is_none());
    assert_eq!(events[2]["records"], 1);
}

#[test]
fn file_sink_appends_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let store = store();
    let template = template();
    let context = BatchContext::new(ScopeId::new("001"), "2026-01-02T03:04:05");
    for _ in 0 .. 2 {
        let sink = FileAuditSink::new(&path).unwrap();
        let batch = InventoryBatch::new(&store, &ENTROPY, &sink, &template, &context);
        batch.generate("").unwrap();
    }
    let events = read_events(&path);
    assert_eq!(events.len(), 4);
    assert_eq!(events[3]["event"], "batch_completed");
    assert_eq!(events[3]["records"], 0);
}

#[test]
fn failed_batch_is_logged_with_its_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).unwrap();
    let store = store();
    let template = template();
    let context = BatchContext::new(ScopeId::new("001"), "2026-01-02T03:04:05");
    let batch = InventoryBatch::new(&store, &ENTROPY, &sink, &template, &context);
    assert!(batch.generate("12A,SHIRT").is_err());
    drop(sink);

    let events = read_events(&path);
    let last = events.last().unwrap();
    assert_eq!(last["event"], "batch_failed");
    assert!(last["error"].as_str().unwrap().contains("line 1"));
}
