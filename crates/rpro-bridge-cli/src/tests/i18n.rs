// crates/rpro-bridge-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Ensure CLI localization remains consistent across supported locales.
// Dependencies: rpro-bridge-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and locale templates preserve placeholder parity with English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;

fn placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut placeholders = BTreeSet::new();
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        if rest[start ..].starts_with('}') {
            return Err(format!("unmatched '}}' in {template}"));
        }
        let after = &rest[start + 1 ..];
        let end = after.find('}').ok_or_else(|| format!("unclosed '{{' in {template}"))?;
        let name = &after[.. end];
        if name.is_empty() || name.contains('{') {
            return Err(format!("malformed placeholder in {template}"));
        }
        if !name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_') {
            return Err(format!("placeholder '{name}' must use [a-z0-9_]"));
        }
        placeholders.insert(name.to_string());
        rest = &after[end + 1 ..];
    }
    Ok(placeholders)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let locale_keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, locale_keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let keys: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys.len(), entries.len(), "duplicate catalog keys ({locale:?})");
    }
}

#[test]
fn catalogs_have_placeholder_shape_parity_with_english() {
    for (key, en_template) in catalog_entries_for(Locale::En) {
        let en_placeholders = placeholder_names(en_template).unwrap();
        let es_template = catalog_for(Locale::Es).get(key).copied().unwrap();
        let es_placeholders = placeholder_names(es_template).unwrap();
        assert_eq!(en_placeholders, es_placeholders, "placeholder mismatch for '{key}'");
    }
}

#[test]
fn spanish_differs_for_curated_keys() {
    for key in ["config.validate.ok", "batch.failed", "i18n.disclaimer.machine_translated"] {
        let en = catalog_for(Locale::En).get(key).copied().unwrap();
        let es = catalog_for(Locale::Es).get(key).copied().unwrap();
        assert_ne!(en, es, "Spanish must differ from English for '{key}'");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN"), Some(Locale::En));
    assert_eq!(Locale::parse("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse("es"), Some(Locale::Es));
    assert_eq!(Locale::parse("es_MX"), Some(Locale::Es));
    assert_eq!(Locale::parse("ES-es"), Some(Locale::Es));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("ca"), None);
    assert_eq!(Locale::Es.as_str(), "es");
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate(
        "inventory.generate.ok",
        vec![MessageArg::new("path", "Salida/Inventory001.xml"), MessageArg::new("records", "3")],
    );
    assert_eq!(output, "Inventory document written to Salida/Inventory001.xml (3 records)");
}

#[test]
fn fallback_chain_en_to_key() {
    assert_eq!(translate("nonexistent.key", vec![]), "nonexistent.key");
}
