// crates/rpro-bridge-core/src/core/catalog.rs
// ============================================================================
// Module: Field Catalog and Templates
// Description: Field catalog entries and the ordered column templates built on them.
// Purpose: Map delimited input columns onto inventory-system attributes.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A catalog lists every attribute the inventory system understands, keyed by
//! its `rpro` code, with a display name, a target document section, and an
//! optional maximum length. A template is an ordered list of `rpro` codes:
//! column `n` of an input line carries the template's `n`-th field.
//!
//! ## Invariants
//! - Template positions equal their index in the template.
//! - A code missing from the catalog resolves with `visual = rpro`, the
//!   section's default, and no length limit.
//! - A template never lists the same code twice.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field code carrying the item UPC in inventory templates.
pub const UPC_FIELD: &str = "local_upc";
/// Field code carrying description 1.
pub const DESCRIPTION1_FIELD: &str = "description1";
/// Field code carrying description 2.
pub const DESCRIPTION2_FIELD: &str = "description2";
/// Field code carrying the ALU.
pub const ALU_FIELD: &str = "alu";
/// Field code carrying the DCS code.
pub const DCS_FIELD: &str = "dcs_code";
/// Field code carrying the vendor code.
pub const VENDOR_FIELD: &str = "vend_code";

// ============================================================================
// SECTION: Catalog Types
// ============================================================================

/// Document section an attribute is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FieldSection {
    /// Subsidiary-level inventory attributes (`INVN_SBS`).
    #[default]
    #[serde(rename = "INVN_SBS")]
    InvnSbs,
    /// User-defined supplemental attributes (`INVN_SBS_SUPPL`).
    #[serde(rename = "INVN_SBS_SUPPL")]
    InvnSbsSuppl,
    /// Transfer-order header attributes (`TO`).
    #[serde(rename = "TO")]
    To,
    /// Transfer-order item attributes (`INVN_BASE_ITEM`).
    #[serde(rename = "INVN_BASE_ITEM")]
    InvnBaseItem,
}

impl FieldSection {
    /// Returns the section's element label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvnSbs => "INVN_SBS",
            Self::InvnSbsSuppl => "INVN_SBS_SUPPL",
            Self::To => "TO",
            Self::InvnBaseItem => "INVN_BASE_ITEM",
        }
    }
}

impl fmt::Display for FieldSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry describing one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Attribute code in the inventory system.
    pub rpro: String,
    /// Display name for the column.
    pub visual: String,
    /// Target document section.
    #[serde(default)]
    pub section: FieldSection,
    /// Maximum value length in characters.
    #[serde(default)]
    pub len: Option<usize>,
}

impl FieldSpec {
    /// Creates a catalog entry without a length limit.
    #[must_use]
    pub fn new(rpro: impl Into<String>, visual: impl Into<String>, section: FieldSection) -> Self {
        Self {
            rpro: rpro.into(),
            visual: visual.into(),
            section,
            len: None,
        }
    }

    /// Sets the maximum value length.
    #[must_use]
    pub const fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }
}

/// Template column resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Attribute code.
    pub rpro: String,
    /// Display name.
    pub visual: String,
    /// Target document section.
    pub section: FieldSection,
    /// Maximum value length in characters.
    pub max_len: Option<usize>,
    /// Zero-based column position.
    pub pos: usize,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while resolving templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A template section lists no fields.
    #[error("template error: {section} template is empty")]
    Empty {
        /// Template section label.
        section: &'static str,
    },
    /// A required field is missing from the template.
    #[error("template error: {section} template must include {rpro}")]
    MissingField {
        /// Template section label.
        section: &'static str,
        /// Required attribute code.
        rpro: &'static str,
    },
    /// A field code appears more than once.
    #[error("template error: {section} template lists {rpro} more than once")]
    DuplicateField {
        /// Template section label.
        section: &'static str,
        /// Duplicated attribute code.
        rpro: String,
    },
}

// ============================================================================
// SECTION: Inventory Template
// ============================================================================

/// Column layout for inventory input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTemplate {
    /// Ordered template fields.
    fields: Vec<TemplateField>,
}

impl InventoryTemplate {
    /// Resolves an inventory template against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is empty, repeats a code,
    /// or omits the UPC or description 1 columns.
    pub fn resolve(catalog: &[FieldSpec], template: &[String]) -> Result<Self, TemplateError> {
        let fields = resolve_fields("inventory", catalog, template, FieldSection::InvnSbs)?;
        for required in [UPC_FIELD, DESCRIPTION1_FIELD] {
            if !fields.iter().any(|field| field.rpro == required) {
                return Err(TemplateError::MissingField {
                    section: "inventory",
                    rpro: required,
                });
            }
        }
        Ok(Self {
            fields,
        })
    }

    /// Returns the ordered fields.
    #[must_use]
    pub fn fields(&self) -> &[TemplateField] {
        &self.fields
    }

    /// Returns the number of input columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Returns the column position of a field code.
    #[must_use]
    pub fn position_of(&self, rpro: &str) -> Option<usize> {
        self.fields.iter().find(|field| field.rpro == rpro).map(|field| field.pos)
    }
}

// ============================================================================
// SECTION: Transfer Order Template
// ============================================================================

/// Column layout for transfer-order header and detail lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOrderTemplate {
    /// Header line fields (after the line tag).
    header: Vec<TemplateField>,
    /// Detail line fields (after the line tag).
    detail: Vec<TemplateField>,
}

impl TransferOrderTemplate {
    /// Resolves transfer-order header and detail templates against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when either section is empty or repeats a code.
    pub fn resolve(
        catalog: &[FieldSpec],
        header: &[String],
        detail: &[String],
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            header: resolve_fields("transfer order header", catalog, header, FieldSection::To)?,
            detail: resolve_fields(
                "transfer order detail",
                catalog,
                detail,
                FieldSection::InvnBaseItem,
            )?,
        })
    }

    /// Returns the header fields.
    #[must_use]
    pub fn header(&self) -> &[TemplateField] {
        &self.header
    }

    /// Returns the detail fields.
    #[must_use]
    pub fn detail(&self) -> &[TemplateField] {
        &self.detail
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves template codes into positioned fields.
fn resolve_fields(
    section: &'static str,
    catalog: &[FieldSpec],
    template: &[String],
    fallback: FieldSection,
) -> Result<Vec<TemplateField>, TemplateError> {
    if template.is_empty() {
        return Err(TemplateError::Empty {
            section,
        });
    }
    let mut seen = BTreeSet::new();
    let mut fields = Vec::with_capacity(template.len());
    for (pos, rpro) in template.iter().enumerate() {
        if !seen.insert(rpro.as_str()) {
            return Err(TemplateError::DuplicateField {
                section,
                rpro: rpro.clone(),
            });
        }
        let field = catalog.iter().find(|spec| spec.rpro == *rpro).map_or_else(
            || TemplateField {
                rpro: rpro.clone(),
                visual: rpro.clone(),
                section: fallback,
                max_len: None,
                pos,
            },
            |spec| TemplateField {
                rpro: spec.rpro.clone(),
                visual: spec.visual.clone(),
                section: spec.section,
                max_len: spec.len,
                pos,
            },
        );
        fields.push(field);
    }
    Ok(fields)
}
