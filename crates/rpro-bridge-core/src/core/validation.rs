// crates/rpro-bridge-core/src/core/validation.rs
// ============================================================================
// Module: Line Validation
// Description: Decoding and column checks for delimited input lines.
// Purpose: Reject malformed input before any identifier is resolved.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Input files are single-byte encoded; every byte maps to the Unicode code
//! point of the same value. Each line must carry exactly one value per
//! template field, and no value may exceed its field's catalog length.
//! Validation stops at the first offending line.
//!
//! ## Invariants
//! - Line numbers in errors are 1-based.
//! - Field indexes in errors are 1-based.
//! - Lengths are counted in characters, not bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::catalog::TemplateField;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by line validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line does not carry one value per template field.
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        /// 1-based line number.
        line: usize,
        /// Template width.
        expected: usize,
        /// Observed column count.
        found: usize,
    },
    /// A value exceeds its field's maximum length.
    #[error("line {line}, field {index} ({rpro}): length {len} exceeds {max}")]
    FieldTooLong {
        /// 1-based line number.
        line: usize,
        /// 1-based field index.
        index: usize,
        /// Field code.
        rpro: String,
        /// Observed length in characters.
        len: usize,
        /// Maximum length.
        max: usize,
    },
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes single-byte (ISO-8859-1) input into text.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Splits one line on the delimiter, keeping empty values.
#[must_use]
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates every line against the template fields.
///
/// # Errors
///
/// Returns the first [`LineError`] encountered.
pub fn validate_lines(
    text: &str,
    delimiter: char,
    fields: &[TemplateField],
) -> Result<(), LineError> {
    for (index, line) in text.lines().enumerate() {
        validate_fields(index + 1, &split_fields(line, delimiter), fields)?;
    }
    Ok(())
}

/// Validates one line's values against the template fields.
///
/// # Errors
///
/// Returns [`LineError::ColumnCount`] or [`LineError::FieldTooLong`].
pub fn validate_fields(
    line: usize,
    values: &[&str],
    fields: &[TemplateField],
) -> Result<(), LineError> {
    if values.len() != fields.len() {
        return Err(LineError::ColumnCount {
            line,
            expected: fields.len(),
            found: values.len(),
        });
    }
    for (value, field) in values.iter().zip(fields) {
        let Some(max) = field.max_len else {
            continue;
        };
        let len = value.chars().count();
        if len > max {
            return Err(LineError::FieldTooLong {
                line,
                index: field.pos + 1,
                rpro: field.rpro.clone(),
                len,
                max,
            });
        }
    }
    Ok(())
}
