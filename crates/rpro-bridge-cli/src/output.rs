// crates/rpro-bridge-cli/src/output.rs
// ============================================================================
// Module: Output Files
// Description: Sequential naming and writing of generated documents.
// Purpose: Keep every run's document instead of overwriting the previous one.
// Dependencies: Standard library filesystem utilities.
// ============================================================================

//! ## Overview
//! Documents are written as `<prefix><NNN>.xml` in the output directory. The
//! sequence is one more than the highest existing sequence for that prefix,
//! zero-padded to three digits and growing past `999` as needed. Writes use
//! `create_new` so an existing file is never replaced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name prefix for inventory documents.
pub const INVENTORY_PREFIX: &str = "Inventory";
/// File name prefix for transfer-order documents.
pub const TRANSFER_ORDER_PREFIX: &str = "TO";
/// File extension of generated documents.
const DOCUMENT_EXTENSION: &str = ".xml";

// ============================================================================
// SECTION: Naming
// ============================================================================

/// Returns the sequence number encoded in `name` for `prefix`, if any.
#[must_use]
pub fn sequence_of(name: &str, prefix: &str) -> Option<u64> {
    let digits = name.strip_prefix(prefix)?.strip_suffix(DOCUMENT_EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Returns the path of the next document for `prefix` in `dir`.
///
/// # Errors
///
/// Returns an I/O error when the directory cannot be listed or the sequence
/// is exhausted.
pub fn next_output_path(dir: &Path, prefix: &str) -> io::Result<PathBuf> {
    let mut highest = 0_u64;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(sequence) = name.to_str().and_then(|name| sequence_of(name, prefix)) {
            highest = highest.max(sequence);
        }
    }
    let next = highest
        .checked_add(1)
        .ok_or_else(|| io::Error::other("output sequence exhausted"))?;
    Ok(dir.join(format!("{prefix}{next:03}{DOCUMENT_EXTENSION}")))
}

/// Writes `contents` to the next document path for `prefix`, creating `dir`.
///
/// # Errors
///
/// Returns an I/O error when the directory or file cannot be created.
pub fn write_next_document(dir: &Path, prefix: &str, contents: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = next_output_path(dir, prefix)?;
    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(path)
}
