// crates/rpro-bridge-core/src/audit.rs
// ============================================================================
// Module: Batch Audit Logging
// Description: Structured audit events for batch document generation.
// Purpose: Emit JSON-line records of every batch and resolution decision.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Batches report their start, every resolved record, and their outcome as
//! audit events. Sinks serialize each event as one JSON line; the caller
//! chooses where those lines go. Sinks never fail the batch: serialization
//! or write errors drop the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::identifiers::ScopeId;
use crate::core::record::Resolution;
use crate::core::sid::Sid;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Kind of batch being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// Inventory document batch.
    Inventory,
    /// Transfer-order document batch.
    TransferOrder,
}

/// Batch audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct BatchAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Batch kind.
    pub batch: BatchKind,
    /// Business-unit scope.
    pub scope: String,
    /// 1-based input line when the event concerns one record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Record UPC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    /// Resolved item SID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_sid: Option<Sid>,
    /// Resolved style SID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_sid: Option<Sid>,
    /// Item SID provenance label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_source: Option<&'static str>,
    /// Style SID provenance label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_source: Option<&'static str>,
    /// Number of records written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    /// Failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchAuditEvent {
    /// Builds an event with no record details.
    fn base(event: &'static str, batch: BatchKind, scope: &ScopeId) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            batch,
            scope: scope.to_string(),
            line: None,
            upc: None,
            item_sid: None,
            style_sid: None,
            item_source: None,
            style_source: None,
            records: None,
            error: None,
        }
    }

    /// Creates a `batch_started` event.
    #[must_use]
    pub fn batch_started(batch: BatchKind, scope: &ScopeId) -> Self {
        Self::base("batch_started", batch, scope)
    }

    /// Creates a `record_resolved` event.
    #[must_use]
    pub fn record_resolved(
        batch: BatchKind,
        scope: &ScopeId,
        line: usize,
        upc: &str,
        resolution: &Resolution,
    ) -> Self {
        let mut event = Self::base("record_resolved", batch, scope);
        event.line = Some(line);
        event.upc = Some(upc.to_string());
        event.item_sid = Some(resolution.item_sid);
        event.style_sid = Some(resolution.style_sid);
        event.item_source = Some(resolution.item_source.label());
        event.style_source = Some(resolution.style_source.label());
        event
    }

    /// Creates a `batch_completed` event.
    #[must_use]
    pub fn batch_completed(batch: BatchKind, scope: &ScopeId, records: usize) -> Self {
        let mut event = Self::base("batch_completed", batch, scope);
        event.records = Some(records);
        event
    }

    /// Creates a `batch_failed` event.
    #[must_use]
    pub fn batch_failed(batch: BatchKind, scope: &ScopeId, error: &str) -> Self {
        let mut event = Self::base("batch_failed", batch, scope);
        event.error = Some(error.to_string());
        event
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for batch events.
pub trait BatchAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &BatchAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl BatchAuditSink for StderrAuditSink {
    fn record(&self, event: &BatchAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl BatchAuditSink for FileAuditSink {
    fn record(&self, event: &BatchAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that drops all events.
pub struct NoopAuditSink;

impl BatchAuditSink for NoopAuditSink {
    fn record(&self, _event: &BatchAuditEvent) {}
}
