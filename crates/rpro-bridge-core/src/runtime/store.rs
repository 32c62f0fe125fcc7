// crates/rpro-bridge-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Lookup Store
// Description: Simple in-memory lookup store for tests and dry runs.
// Purpose: Provide a deterministic lookup implementation without a database.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! This module provides an in-memory implementation of [`SidLookup`] and
//! [`ReferenceLookup`]. Items are kept in insertion order, so a description
//! shared by several items resolves to the earliest one. A failure can be
//! armed to exercise error propagation, and every lookup is counted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::identifiers::ScopeId;
use crate::core::sid::Sid;
use crate::interfaces::ItemDetail;
use crate::interfaces::LookupError;
use crate::interfaces::ReferenceLookup;
use crate::interfaces::SidLookup;
use crate::interfaces::StoredItemStyle;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Item row held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryItem {
    /// Owning scope.
    pub scope: ScopeId,
    /// Item UPC.
    pub upc: String,
    /// Item description 1.
    pub description1: String,
    /// Stored item attributes.
    pub detail: ItemDetail,
}

impl InMemoryItem {
    /// Creates an item row without cost, tax, DCS, or vendor data.
    #[must_use]
    pub fn new(
        scope: ScopeId,
        upc: impl Into<String>,
        description1: impl Into<String>,
        style_sid: Sid,
        item_sid: Sid,
    ) -> Self {
        Self {
            scope,
            upc: upc.into(),
            description1: description1.into(),
            detail: ItemDetail {
                style_sid,
                item_sid,
                cost: None,
                tax_code: None,
                dcs_code: None,
                vend_code: None,
            },
        }
    }
}

/// Mutable state behind the store handle.
#[derive(Debug, Default)]
struct InMemoryState {
    /// Item rows in insertion order.
    items: Vec<InMemoryItem>,
    /// DCS tax codes keyed by (scope, dcs code).
    dcs: BTreeMap<(String, String), Option<String>>,
    /// Vendor codes keyed by (scope, vendor code).
    vendors: BTreeSet<(String, String)>,
    /// Failure returned by every lookup when armed.
    failure: Option<LookupError>,
    /// Number of lookups served.
    lookups: usize,
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory lookup store for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLookupStore {
    /// Store state protected by a mutex.
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryLookupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item row.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] when the state mutex is poisoned.
    pub fn insert_item(&self, item: InMemoryItem) -> Result<(), LookupError> {
        self.lock()?.items.push(item);
        Ok(())
    }

    /// Adds a DCS code with an optional tax code.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] when the state mutex is poisoned.
    pub fn insert_dcs(
        &self,
        scope: &ScopeId,
        dcs_code: &str,
        tax_code: Option<&str>,
    ) -> Result<(), LookupError> {
        self.lock()?
            .dcs
            .insert((scope.to_string(), dcs_code.to_string()), tax_code.map(str::to_string));
        Ok(())
    }

    /// Adds a vendor code.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] when the state mutex is poisoned.
    pub fn insert_vendor(&self, scope: &ScopeId, vend_code: &str) -> Result<(), LookupError> {
        self.lock()?.vendors.insert((scope.to_string(), vend_code.to_string()));
        Ok(())
    }

    /// Makes every subsequent lookup fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] when the state mutex is poisoned.
    pub fn fail_with(&self, error: LookupError) -> Result<(), LookupError> {
        self.lock()?.failure = Some(error);
        Ok(())
    }

    /// Returns the number of lookups served or failed so far.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] when the state mutex is poisoned.
    pub fn lookup_count(&self) -> Result<usize, LookupError> {
        Ok(self.lock()?.lookups)
    }

    /// Locks the state.
    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, LookupError> {
        self.state.lock().map_err(|_| LookupError::Io("lookup store mutex poisoned".to_string()))
    }

    /// Locks the state for one lookup, counting it and applying an armed failure.
    fn begin_lookup(&self) -> Result<MutexGuard<'_, InMemoryState>, LookupError> {
        let mut guard = self.lock()?;
        guard.lookups += 1;
        if let Some(error) = guard.failure.clone() {
            return Err(error);
        }
        Ok(guard)
    }
}

impl SidLookup for InMemoryLookupStore {
    fn lookup_item_style(
        &self,
        scope: &ScopeId,
        upc: &str,
    ) -> Result<Option<StoredItemStyle>, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard.items.iter().find(|item| item.scope == *scope && item.upc == upc).map(|item| {
            StoredItemStyle {
                style_sid: item.detail.style_sid,
                item_sid: item.detail.item_sid,
            }
        }))
    }

    fn lookup_style_by_description(
        &self,
        scope: &ScopeId,
        description1: &str,
    ) -> Result<Option<Sid>, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard
            .items
            .iter()
            .find(|item| item.scope == *scope && item.description1 == description1)
            .map(|item| item.detail.style_sid))
    }
}

impl ReferenceLookup for InMemoryLookupStore {
    fn dcs_exists(&self, scope: &ScopeId, dcs_code: &str) -> Result<bool, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard.dcs.contains_key(&(scope.to_string(), dcs_code.to_string())))
    }

    fn vendor_exists(&self, scope: &ScopeId, vend_code: &str) -> Result<bool, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard.vendors.contains(&(scope.to_string(), vend_code.to_string())))
    }

    fn dcs_tax_code(
        &self,
        scope: &ScopeId,
        dcs_code: &str,
    ) -> Result<Option<String>, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard.dcs.get(&(scope.to_string(), dcs_code.to_string())).cloned().flatten())
    }

    fn item_detail(&self, scope: &ScopeId, upc: &str) -> Result<Option<ItemDetail>, LookupError> {
        let guard = self.begin_lookup()?;
        Ok(guard
            .items
            .iter()
            .find(|item| item.scope == *scope && item.upc == upc)
            .map(|item| item.detail.clone()))
    }
}
