// crates/rpro-bridge-core/src/runtime/resolver.rs
// ============================================================================
// Module: SID Resolution Policy
// Description: Per-record reuse-or-generate decision for item and style SIDs.
// Purpose: Resolve every record to an (item, style) SID pair under one policy.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! For each record the resolver first asks the store for the UPC. A hit is
//! returned as-is and nothing is generated. On a miss, the item SID is
//! derived from the configured item mode and the style SID is resolved on
//! its own: an existing style with the same description 1 is reused,
//! otherwise one is derived from the configured style mode.
//!
//! ## Invariants
//! - Item resolution reads only the UPC (or ALU in `alu` mode).
//! - Style resolution reads only the descriptions.
//! - Lookup failures are returned immediately and never retried.
//! - The scope and generation policy are fixed for the resolver's lifetime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::ScopeId;
use crate::core::modes::ItemSidMode;
use crate::core::modes::SidGeneratorConfig;
use crate::core::modes::StyleSidMode;
use crate::core::record::InventoryRecord;
use crate::core::record::Resolution;
use crate::core::record::SidSource;
use crate::core::seed::SeedError;
use crate::core::seed::sid_from_both;
use crate::core::seed::sid_from_desc;
use crate::core::seed::sid_from_upc;
use crate::core::sid::Sid;
use crate::interfaces::EntropySource;
use crate::interfaces::LookupError;
use crate::interfaces::SidLookup;
use crate::runtime::entropy::sid_random;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while resolving a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A business key could not seed a SID.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// The store lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolution policy bound to one store session, scope, and policy snapshot.
pub struct SidResolver<'a, L: ?Sized, E: ?Sized> {
    /// Existing-identifier lookups.
    lookup: &'a L,
    /// Entropy for time-based seeds.
    entropy: &'a E,
    /// Business-unit scope for every lookup.
    scope: ScopeId,
    /// Generation policy snapshot.
    config: SidGeneratorConfig,
}

impl<'a, L, E> SidResolver<'a, L, E>
where
    L: SidLookup + ?Sized,
    E: EntropySource + ?Sized,
{
    /// Creates a resolver.
    #[must_use]
    pub const fn new(
        lookup: &'a L,
        entropy: &'a E,
        scope: ScopeId,
        config: SidGeneratorConfig,
    ) -> Self {
        Self {
            lookup,
            entropy,
            scope,
            config,
        }
    }

    /// Returns the lookup scope.
    #[must_use]
    pub const fn scope(&self) -> &ScopeId {
        &self.scope
    }

    /// Returns the generation policy.
    #[must_use]
    pub const fn config(&self) -> SidGeneratorConfig {
        self.config
    }

    /// Resolves one record to its (item, style) SID pair.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a lookup fails or a numeric key is malformed.
    pub fn resolve(&self, record: &InventoryRecord) -> Result<Resolution, ResolveError> {
        if let Some(stored) = self.lookup.lookup_item_style(&self.scope, &record.upc)? {
            return Ok(Resolution {
                item_sid: stored.item_sid,
                style_sid: stored.style_sid,
                item_source: SidSource::Existing,
                style_source: SidSource::Existing,
            });
        }
        let (item_sid, item_source) = self.generate_item_sid(record)?;
        let (style_sid, style_source) = self.resolve_style_sid(record)?;
        Ok(Resolution {
            item_sid,
            style_sid,
            item_source,
            style_source,
        })
    }

    /// Derives a new item SID from the configured item mode.
    ///
    /// In `alu` mode a record without an ALU seeds from its UPC, and the
    /// returned source reports `upc`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Seed`] when the seeding key is not numeric.
    pub fn generate_item_sid(
        &self,
        record: &InventoryRecord,
    ) -> Result<(Sid, SidSource), ResolveError> {
        let generated = match self.config.item_sid_mode {
            ItemSidMode::Random => (sid_random(self.entropy), ItemSidMode::Random),
            ItemSidMode::Alu => match record.alu_key() {
                Some(alu) => (sid_from_upc(alu)?, ItemSidMode::Alu),
                None => (sid_from_upc(&record.upc)?, ItemSidMode::Upc),
            },
            ItemSidMode::Upc => (sid_from_upc(&record.upc)?, ItemSidMode::Upc),
        };
        Ok((generated.0, SidSource::GeneratedItem(generated.1)))
    }

    /// Reuses the style SID stored for description 1, or derives a new one.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Lookup`] when the description lookup fails.
    pub fn resolve_style_sid(
        &self,
        record: &InventoryRecord,
    ) -> Result<(Sid, SidSource), ResolveError> {
        if let Some(style_sid) =
            self.lookup.lookup_style_by_description(&self.scope, &record.description1)?
        {
            return Ok((style_sid, SidSource::Existing));
        }
        let mode = self.config.style_sid_mode;
        let style_sid = match mode {
            StyleSidMode::Desc1 => sid_from_desc(&record.description1),
            StyleSidMode::Both => sid_from_both(&record.description1, &record.description2),
            StyleSidMode::Random => sid_random(self.entropy),
        };
        Ok((style_sid, SidSource::GeneratedStyle(mode)))
    }
}
