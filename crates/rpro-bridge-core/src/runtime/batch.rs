// crates/rpro-bridge-core/src/runtime/batch.rs
// ============================================================================
// Module: Batch Context
// Description: Shared inputs, outputs, and errors of document batches.
// Purpose: Carry the per-batch snapshot and report fatal batch failures.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! A batch is one input file turned into one document. Everything a batch
//! reads besides its input text is captured in a [`BatchContext`] at batch
//! start and never changes afterwards. Any [`BatchError`] aborts the whole
//! batch; no partial document is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::catalog::TemplateError;
use crate::core::document::Element;
use crate::core::document::render_xml;
use crate::core::identifiers::ScopeId;
use crate::core::modes::SidGeneratorConfig;
use crate::core::validation::LineError;
use crate::interfaces::LookupError;
use crate::runtime::resolver::ResolveError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default input delimiter.
pub const DEFAULT_DELIMITER: char = ',';

// ============================================================================
// SECTION: Context
// ============================================================================

/// Immutable per-batch snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchContext {
    /// Business-unit scope.
    pub scope: ScopeId,
    /// Field delimiter of the input lines.
    pub delimiter: char,
    /// Timestamp written as `modified_date` (`YYYY-MM-DDTHH:MM:SS`).
    pub modified_date: String,
    /// SID generation policy.
    pub sid_config: SidGeneratorConfig,
}

impl BatchContext {
    /// Creates a context with the default delimiter and generation policy.
    #[must_use]
    pub fn new(scope: ScopeId, modified_date: impl Into<String>) -> Self {
        Self {
            scope,
            delimiter: DEFAULT_DELIMITER,
            modified_date: modified_date.into(),
            sid_config: SidGeneratorConfig::default(),
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the SID generation policy.
    #[must_use]
    pub const fn with_sid_config(mut self, sid_config: SidGeneratorConfig) -> Self {
        self.sid_config = sid_config;
        self
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Document produced by a successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDocument {
    /// Document root element.
    pub root: Element,
    /// Number of records written.
    pub records: usize,
}

impl BatchDocument {
    /// Renders the document as XML text.
    #[must_use]
    pub fn render(&self) -> String {
        render_xml(&self.root)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal batch errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Template does not fit the catalog.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Input line failed validation.
    #[error(transparent)]
    Line(#[from] LineError),
    /// Store is not ready.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// Record resolution failed.
    #[error("line {line}: {source}")]
    Resolve {
        /// 1-based input line.
        line: usize,
        /// Underlying failure.
        source: ResolveError,
    },
    /// Reference lookup failed while processing a line.
    #[error("line {line}: {source}")]
    LineLookup {
        /// 1-based input line.
        line: usize,
        /// Underlying failure.
        source: LookupError,
    },
    /// DCS code is unknown in scope.
    #[error("line {line}: dcs code '{dcs_code}' does not exist")]
    UnknownDcs {
        /// 1-based input line.
        line: usize,
        /// Rejected DCS code.
        dcs_code: String,
    },
    /// Vendor code is unknown in scope.
    #[error("line {line}: vendor code '{vend_code}' does not exist")]
    UnknownVendor {
        /// 1-based input line.
        line: usize,
        /// Rejected vendor code.
        vend_code: String,
    },
    /// Transfer-order detail references an unknown UPC.
    #[error("detail line {line}: upc '{upc}' does not exist")]
    UnknownUpc {
        /// 1-based detail position after the header.
        line: usize,
        /// Rejected UPC.
        upc: String,
    },
    /// Transfer-order input does not start with a header line.
    #[error("transfer order must start with a header line tagged 'H'")]
    MissingHeader,
}
