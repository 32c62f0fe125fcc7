// crates/rpro-bridge-core/tests/templates_and_lines.rs
// ============================================================================
// Module: Template and Line Validation Tests
// Description: Tests for catalog resolution and delimited line checks.
// Purpose: Ensure malformed templates and input lines are rejected up front.
// Dependencies: rpro-bridge-core
// ============================================================================
//! ## Overview
//! Covers template resolution against a catalog, Latin-1 decoding, column
//! counts, and per-field maximum lengths.

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

use rpro_bridge_core::FieldSection;
use rpro_bridge_core::FieldSpec;
use rpro_bridge_core::InventoryTemplate;
use rpro_bridge_core::LineError;
use rpro_bridge_core::TemplateError;
use rpro_bridge_core::TransferOrderTemplate;
use rpro_bridge_core::decode_latin1;
use rpro_bridge_core::split_fields;
use rpro_bridge_core::validate_lines;

fn catalog() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("local_upc", "UPC", FieldSection::InvnSbs).with_len(13),
        FieldSpec::new("description1", "Descripcion", FieldSection::InvnSbs).with_len(10),
        FieldSpec::new("udf_1", "Marca", FieldSection::InvnSbsSuppl),
    ]
}

fn codes(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

// ============================================================================
// SECTION: Templates
// ============================================================================

#[test]
fn template_fields_take_catalog_metadata() {
    let template =
        InventoryTemplate::resolve(&catalog(), &codes(&["description1", "local_upc", "cost"]))
            .unwrap();
    assert_eq!(template.width(), 3);
    let fields = template.fields();
    assert_eq!(fields[0].visual, "Descripcion");
    assert_eq!(fields[0].max_len, Some(10));
    assert_eq!(fields[1].pos, 1);
    assert_eq!(template.position_of("local_upc"), Some(1));
    assert_eq!(template.position_of("alu"), None);
}

#[test]
fn unknown_codes_fall_back_to_defaults() {
    let template =
        InventoryTemplate::resolve(&catalog(), &codes(&["local_upc", "description1", "cost"]))
            .unwrap();
    let cost = &template.fields()[2];
    assert_eq!(cost.visual, "cost");
    assert_eq!(cost.section, FieldSection::InvnSbs);
    assert_eq!(cost.max_len, None);
}

#[test]
fn inventory_template_requires_upc_and_description1() {
    let err = InventoryTemplate::resolve(&catalog(), &codes(&["description1"])).unwrap_err();
    assert_eq!(
        err,
        TemplateError::MissingField {
            section: "inventory",
            rpro: "local_upc"
        }
    );
    let err = InventoryTemplate::resolve(&catalog(), &codes(&["local_upc"])).unwrap_err();
    assert!(matches!(err, TemplateError::MissingField { rpro: "description1", .. }));
}

#[test]
fn templates_reject_empty_and_duplicate_codes() {
    assert!(matches!(
        InventoryTemplate::resolve(&catalog(), &[]).unwrap_err(),
        TemplateError::Empty { .. }
    ));
    let err = InventoryTemplate::resolve(
        &catalog(),
        &codes(&["local_upc", "description1", "local_upc"]),
    )
    .unwrap_err();
    assert!(matches!(err, TemplateError::DuplicateField { .. }));
}

#[test]
fn transfer_order_sections_use_their_own_fallbacks() {
    let template =
        TransferOrderTemplate::resolve(&[], &codes(&["sbs_no"]), &codes(&["upc", "ord_qty"]))
            .unwrap();
    assert_eq!(template.header()[0].section, FieldSection::To);
    assert_eq!(template.detail()[1].section, FieldSection::InvnBaseItem);
    assert!(TransferOrderTemplate::resolve(&[], &codes(&["sbs_no"]), &[]).is_err());
    assert!(TransferOrderTemplate::resolve(&[], &[], &codes(&["upc"])).is_err());
}

#[test]
fn field_spec_parses_from_json() {
    let spec: FieldSpec = serde_json::from_str(
        r#"{"rpro":"udf_2","visual":"Color","section":"INVN_SBS_SUPPL","len":20}"#,
    )
    .unwrap();
    assert_eq!(spec.section, FieldSection::InvnSbsSuppl);
    assert_eq!(spec.len, Some(20));
    let spec: FieldSpec = serde_json::from_str(r#"{"rpro":"cost","visual":"Costo"}"#).unwrap();
    assert_eq!(spec.section, FieldSection::InvnSbs);
}

// ============================================================================
// SECTION: Lines
// ============================================================================

#[test]
fn latin1_bytes_map_to_code_points() {
    assert_eq!(decode_latin1(b"CAF\xC9"), "CAFÉ");
    assert_eq!(decode_latin1(&[0xD1, 0x41]), "ÑA");
}

#[test]
fn split_keeps_empty_fields() {
    assert_eq!(split_fields("a;;b;", ';'), vec!["a", "", "b", ""]);
}

#[test]
fn lines_with_wrong_column_count_are_rejected() {
    let template =
        InventoryTemplate::resolve(&catalog(), &codes(&["local_upc", "description1"])).unwrap();
    let text = "1,SHIRT\n2,SHIRT,EXTRA\n";
    let err = validate_lines(text, ',', template.fields()).unwrap_err();
    assert_eq!(
        err,
        LineError::ColumnCount {
            line: 2,
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn overlong_fields_are_rejected_by_character_count() {
    let template =
        InventoryTemplate::resolve(&catalog(), &codes(&["local_upc", "description1"])).unwrap();
    // Ten characters, more than ten bytes in UTF-8.
    assert!(validate_lines("1,ÑÑÑÑÑÑÑÑÑÑ", ',', template.fields()).is_ok());
    let err = validate_lines("1,ABCDEFGHIJK", ',', template.fields()).unwrap_err();
    assert_eq!(
        err,
        LineError::FieldTooLong {
            line: 1,
            index: 2,
            rpro: "description1".to_string(),
            len: 11,
            max: 10
        }
    );
    assert_eq!(err.to_string(), "line 1, field 2 (description1): length 11 exceeds 10");
}

#[test]
fn crlf_line_endings_are_accepted() {
    let template =
        InventoryTemplate::resolve(&catalog(), &codes(&["local_upc", "description1"])).unwrap();
    assert!(validate_lines("1,A\r\n2,B\r\n", ',', template.fields()).is_ok());
}
