// crates/rpro-bridge-core/src/runtime/inventory.rs
// ============================================================================
// Module: Inventory Batch
// Description: Builds the inventory import document from delimited lines.
// Purpose: Validate, resolve, and assemble one INVENTORY element per line.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Each input line becomes one `INVENTORY` element:
//!
//! ```text
//! INVENTORY
//!   INVN_STYLE style_sid
//!   INVN       item_sid upc
//!   INVN_SBS   fixed attributes + INVN_SBS template fields [+ tax_code]
//!     INVN_SBS_SUPPLS
//!       INVN_SBS_SUPPL udf_no udf_value
//! ```
//!
//! Lines are validated up front. Reference checks run only for fields the
//! template maps: a mapped DCS or vendor code must exist in scope. The first
//! failure aborts the batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::BatchAuditEvent;
use crate::audit::BatchAuditSink;
use crate::audit::BatchKind;
use crate::core::catalog::ALU_FIELD;
use crate::core::catalog::DCS_FIELD;
use crate::core::catalog::DESCRIPTION1_FIELD;
use crate::core::catalog::DESCRIPTION2_FIELD;
use crate::core::catalog::FieldSection;
use crate::core::catalog::InventoryTemplate;
use crate::core::catalog::UPC_FIELD;
use crate::core::catalog::VENDOR_FIELD;
use crate::core::document::Element;
use crate::core::record::InventoryRecord;
use crate::core::validation::split_fields;
use crate::core::validation::validate_lines;
use crate::interfaces::EntropySource;
use crate::interfaces::ReferenceLookup;
use crate::interfaces::SidLookup;
use crate::runtime::batch::BatchContext;
use crate::runtime::batch::BatchDocument;
use crate::runtime::batch::BatchError;
use crate::runtime::resolver::SidResolver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed `INVN_SBS` attributes written ahead of template fields.
const STATIC_SBS_ATTRIBUTES: [(&str, &str); 9] = [
    ("currency_id", "1"),
    ("currency_name", "DOLLARS"),
    ("flag", "0"),
    ("kit_type", "0"),
    ("max_disc_perc1", "100"),
    ("max_disc_perc2", "100"),
    ("print_tag", "1"),
    ("active", "1"),
    ("cms", "0"),
];

// ============================================================================
// SECTION: Inventory Batch
// ============================================================================

/// Inventory document builder bound to one store session.
pub struct InventoryBatch<'a, L: ?Sized, E: ?Sized> {
    /// Store lookups shared by every line.
    lookup: &'a L,
    /// Entropy for random SID modes.
    entropy: &'a E,
    /// Audit sink for batch events.
    audit: &'a dyn BatchAuditSink,
    /// Resolved column layout.
    template: &'a InventoryTemplate,
    /// Batch snapshot.
    context: &'a BatchContext,
}

impl<'a, L, E> InventoryBatch<'a, L, E>
where
    L: SidLookup + ReferenceLookup + ?Sized,
    E: EntropySource + ?Sized,
{
    /// Creates an inventory batch.
    #[must_use]
    pub fn new(
        lookup: &'a L,
        entropy: &'a E,
        audit: &'a dyn BatchAuditSink,
        template: &'a InventoryTemplate,
        context: &'a BatchContext,
    ) -> Self {
        Self {
            lookup,
            entropy,
            audit,
            template,
            context,
        }
    }

    /// Builds the document for the given input text.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] on the first validation, reference, or
    /// resolution failure.
    pub fn generate(&self, text: &str) -> Result<BatchDocument, BatchError> {
        let scope = &self.context.scope;
        self.audit.record(&BatchAuditEvent::batch_started(BatchKind::Inventory, scope));
        match self.build(text) {
            Ok(document) => {
                self.audit.record(&BatchAuditEvent::batch_completed(
                    BatchKind::Inventory,
                    scope,
                    document.records,
                ));
                Ok(document)
            }
            Err(err) => {
                self.audit.record(&BatchAuditEvent::batch_failed(
                    BatchKind::Inventory,
                    scope,
                    &err.to_string(),
                ));
                Err(err)
            }
        }
    }

    /// Validates and converts every line.
    fn build(&self, text: &str) -> Result<BatchDocument, BatchError> {
        SidLookup::readiness(self.lookup)?;
        validate_lines(text, self.context.delimiter, self.template.fields())?;
        let resolver = SidResolver::new(
            self.lookup,
            self.entropy,
            self.context.scope.clone(),
            self.context.sid_config,
        );
        let mut inventorys = Element::new("INVENTORYS");
        let mut records = 0;
        for (index, line) in text.lines().enumerate() {
            let values = split_fields(line, self.context.delimiter);
            let inventory = self.build_inventory(&resolver, index + 1, &values)?;
            inventorys.push_child(inventory);
            records += 1;
        }
        let mut root = Element::new("DOCUMENT");
        root.push_child(inventorys);
        Ok(BatchDocument {
            root,
            records,
        })
    }

    /// Converts one validated line into an `INVENTORY` element.
    fn build_inventory(
        &self,
        resolver: &SidResolver<'_, L, E>,
        line: usize,
        values: &[&str],
    ) -> Result<Element, BatchError> {
        let scope = &self.context.scope;
        let upc = self.mapped_value(values, UPC_FIELD).unwrap_or_default();
        let dcs_code = self.mapped_value(values, DCS_FIELD);
        if let Some(dcs_code) = dcs_code {
            let exists = self
                .lookup
                .dcs_exists(scope, dcs_code)
                .map_err(|source| BatchError::LineLookup {
                    line,
                    source,
                })?;
            if !exists {
                return Err(BatchError::UnknownDcs {
                    line,
                    dcs_code: dcs_code.to_string(),
                });
            }
        }
        if let Some(vend_code) = self.mapped_value(values, VENDOR_FIELD) {
            let exists = self
                .lookup
                .vendor_exists(scope, vend_code)
                .map_err(|source| BatchError::LineLookup {
                    line,
                    source,
                })?;
            if !exists {
                return Err(BatchError::UnknownVendor {
                    line,
                    vend_code: vend_code.to_string(),
                });
            }
        }

        let mut record = InventoryRecord::new(
            upc,
            self.mapped_value(values, DESCRIPTION1_FIELD).unwrap_or_default(),
            self.mapped_value(values, DESCRIPTION2_FIELD).unwrap_or_default(),
        );
        if let Some(alu) = self.mapped_value(values, ALU_FIELD) {
            record = record.with_alu(alu);
        }
        let resolution = resolver.resolve(&record).map_err(|source| BatchError::Resolve {
            line,
            source,
        })?;
        self.audit.record(&BatchAuditEvent::record_resolved(
            BatchKind::Inventory,
            scope,
            line,
            upc,
            &resolution,
        ));

        let mut inventory = Element::new("INVENTORY");
        inventory.push_child(
            Element::new("INVN_STYLE").with_attr("style_sid", resolution.style_sid.to_string()),
        );
        inventory.push_child(
            Element::new("INVN")
                .with_attr("item_sid", resolution.item_sid.to_string())
                .with_attr("upc", upc),
        );

        let mut sbs = self.static_sbs();
        let mut udfs: Vec<(&str, &str)> = Vec::new();
        for field in self.template.fields() {
            let value = values.get(field.pos).copied().unwrap_or_default();
            match field.section {
                FieldSection::InvnSbs => sbs.set_attr(field.rpro.as_str(), value),
                FieldSection::InvnSbsSuppl => {
                    let udf_no = field.rpro.split_once('_').map_or("", |(_, number)| number);
                    if let Some(slot) = udfs.iter_mut().find(|(no, _)| *no == udf_no) {
                        slot.1 = value;
                    } else {
                        udfs.push((udf_no, value));
                    }
                }
                FieldSection::To | FieldSection::InvnBaseItem => {}
            }
        }
        if let Some(dcs_code) = dcs_code.filter(|code| !code.is_empty()) {
            let tax_code = self
                .lookup
                .dcs_tax_code(scope, dcs_code)
                .map_err(|source| BatchError::LineLookup {
                    line,
                    source,
                })?;
            if let Some(tax_code) = tax_code {
                sbs.set_attr("tax_code", tax_code);
            }
        }
        if !udfs.is_empty() {
            let suppls = sbs.push_child(Element::new("INVN_SBS_SUPPLS"));
            for (udf_no, udf_value) in udfs {
                suppls.push_child(
                    Element::new("INVN_SBS_SUPPL")
                        .with_attr("udf_no", udf_no)
                        .with_attr("udf_value", udf_value),
                );
            }
        }
        inventory.push_child(sbs);
        Ok(inventory)
    }

    /// Returns the trimmed value of a mapped field, or `None` when unmapped.
    fn mapped_value<'v>(&self, values: &[&'v str], rpro: &str) -> Option<&'v str> {
        self.template
            .position_of(rpro)
            .map(|pos| values.get(pos).copied().unwrap_or_default().trim())
    }

    /// Builds `INVN_SBS` with the fixed attributes.
    fn static_sbs(&self) -> Element {
        let mut sbs = Element::new("INVN_SBS")
            .with_attr("sbs_no", self.context.scope.as_str())
            .with_attr("modified_date", self.context.modified_date.as_str());
        for (key, value) in STATIC_SBS_ATTRIBUTES {
            sbs.set_attr(key, value);
        }
        sbs
    }
}
