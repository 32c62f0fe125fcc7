// crates/rpro-bridge-cli/src/lib.rs
// ============================================================================
// Module: RPro Bridge CLI Library
// Description: Shared helpers for the bridge command-line interface.
// Purpose: Provide reusable components (i18n, output naming) for the binary.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities: the internationalized
//! message catalog and the sequential output-file naming. The binary entry
//! point (`src/main.rs`) imports these helpers to keep user-facing output and
//! generated file names consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Sequential naming and writing of generated documents.
pub mod output;
