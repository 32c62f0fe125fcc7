// crates/rpro-bridge-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: rpro-bridge-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the bridge CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](rpro_bridge_cli::t) macro formats placeholders correctly.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use rpro_bridge_cli::i18n::Locale;
use rpro_bridge_cli::i18n::MessageArg;
use rpro_bridge_cli::i18n::current_locale;
use rpro_bridge_cli::i18n::translate;
use rpro_bridge_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_captures_key_and_value() {
    let arg = MessageArg::new("path", "Salida/TO001.xml");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "Salida/TO001.xml");
}

/// Confirms unknown keys are returned verbatim.
#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("no.such.key", Vec::new()), "no.such.key");
}

/// Confirms the default locale is English without an explicit selection.
#[test]
fn default_locale_is_english() {
    assert_eq!(current_locale(), Locale::En);
}

/// Confirms the macro substitutes every named placeholder.
#[test]
fn t_macro_substitutes_placeholders() {
    let message = t!("transfer_order.generate.ok", path = "Salida/TO002.xml", records = 4);
    assert_eq!(message, "Transfer order written to Salida/TO002.xml (4 items)");
}

/// Confirms placeholders without a matching argument are left untouched.
#[test]
fn t_macro_leaves_missing_placeholders() {
    let message = t!("store.check.ok");
    assert_eq!(message, "Lookup store at {path} is ready.");
}
