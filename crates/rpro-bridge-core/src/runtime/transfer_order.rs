// crates/rpro-bridge-core/src/runtime/transfer_order.rs
// ============================================================================
// Module: Transfer Order Batch
// Description: Builds the transfer-order import document from tagged lines.
// Purpose: Assemble one TO header and one TO_ITEM per detail line.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Input lines carry a leading tag column:
//!
//! - `H` header; must be the first line.
//! - `I` detail: `upc`, `ord_qty`, and an optional `price`, in that order.
//! - `S` stops the detail section; any later lines are ignored.
//!
//! Lines with any other tag are skipped. Header and detail lines are checked
//! against their own template; column counts exclude the tag. Every detail
//! UPC must already exist in the store, since the item attributes are copied
//! from it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::audit::BatchAuditEvent;
use crate::audit::BatchAuditSink;
use crate::audit::BatchKind;
use crate::core::catalog::TransferOrderTemplate;
use crate::core::document::Element;
use crate::core::identifiers::ScopeId;
use crate::core::validation::split_fields;
use crate::core::validation::validate_fields;
use crate::interfaces::EntropySource;
use crate::interfaces::ReferenceLookup;
use crate::runtime::batch::BatchContext;
use crate::runtime::batch::BatchDocument;
use crate::runtime::batch::BatchError;
use crate::runtime::entropy::sid_random;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header line tag.
const HEADER_TAG: &str = "H";
/// Detail line tag.
const DETAIL_TAG: &str = "I";
/// Stop line tag.
const STOP_TAG: &str = "S";

// ============================================================================
// SECTION: Transfer Order Batch
// ============================================================================

/// Transfer-order document builder bound to one store session.
pub struct TransferOrderBatch<'a, L: ?Sized, E: ?Sized> {
    /// Reference lookups shared by every line.
    lookup: &'a L,
    /// Entropy for the transfer-order SID.
    entropy: &'a E,
    /// Audit sink for batch events.
    audit: &'a dyn BatchAuditSink,
    /// Resolved header and detail layouts.
    template: &'a TransferOrderTemplate,
    /// Batch snapshot.
    context: &'a BatchContext,
}

impl<'a, L, E> TransferOrderBatch<'a, L, E>
where
    L: ReferenceLookup + ?Sized,
    E: EntropySource + ?Sized,
{
    /// Creates a transfer-order batch.
    #[must_use]
    pub fn new(
        lookup: &'a L,
        entropy: &'a E,
        audit: &'a dyn BatchAuditSink,
        template: &'a TransferOrderTemplate,
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
    /// Returns [`BatchError`] when the header is missing, a line fails
    /// validation, a lookup fails, or a detail UPC is unknown.
    pub fn generate(&self, text: &str) -> Result<BatchDocument, BatchError> {
        let scope = &self.context.scope;
        self.audit.record(&BatchAuditEvent::batch_started(BatchKind::TransferOrder, scope));
        match self.build(text) {
            Ok(document) => {
                self.audit.record(&BatchAuditEvent::batch_completed(
                    BatchKind::TransferOrder,
                    scope,
                    document.records,
                ));
                Ok(document)
            }
            Err(err) => {
                self.audit.record(&BatchAuditEvent::batch_failed(
                    BatchKind::TransferOrder,
                    scope,
                    &err.to_string(),
                ));
                Err(err)
            }
        }
    }

    /// Converts the header and every detail line.
    fn build(&self, text: &str) -> Result<BatchDocument, BatchError> {
        ReferenceLookup::readiness(self.lookup)?;
        let delimiter = self.context.delimiter;
        let mut lines = text.lines();
        let header_values = lines
            .next()
            .map(|line| split_fields(line, delimiter))
            .filter(|values| values.first() == Some(&HEADER_TAG))
            .ok_or(BatchError::MissingHeader)?;
        let header = self.build_header(&header_values)?;
        let store_scope =
            header.attr("sbs_no").map_or_else(|| self.context.scope.clone(), ScopeId::from);

        let mut items = Element::new("TO_ITEMS");
        let mut records = 0;
        for (offset, line) in lines.enumerate() {
            let values = split_fields(line, delimiter);
            match values.first().copied() {
                Some(STOP_TAG) => break,
                Some(DETAIL_TAG) => {}
                _ => continue,
            }
            let columns = values.get(1 ..).unwrap_or_default();
            validate_fields(offset + 2, columns, self.template.detail())?;
            let item = self.build_item(&store_scope, offset + 1, columns)?;
            items.push_child(item);
            records += 1;
        }

        let mut to = Element::new("TO");
        to.push_child(header);
        to.push_child(items);
        let mut root = Element::new("DOCUMENT");
        root.push_child(to);
        Ok(BatchDocument {
            root,
            records,
        })
    }

    /// Builds `TO_HDR` from the header line values (tag included).
    fn build_header(&self, values: &[&str]) -> Result<Element, BatchError> {
        let fields = values.get(1 ..).unwrap_or_default();
        validate_fields(1, fields, self.template.header())?;
        let mut header = Element::new("TO_HDR")
            .with_attr("to_sid", sid_random(self.entropy).to_string())
            .with_attr("to_type", "0")
            .with_attr("modified_date", self.context.modified_date.as_str())
            .with_attr("cms", "1")
            .with_attr("held", "1")
            .with_attr("active", "1");
        for (field, value) in self.template.header().iter().zip(fields) {
            header.set_attr(field.rpro.as_str(), value.trim());
        }
        Ok(header)
    }

    /// Builds one `TO_ITEM` from detail columns (tag excluded).
    fn build_item(
        &self,
        scope: &ScopeId,
        item_pos: usize,
        columns: &[&str],
    ) -> Result<Element, BatchError> {
        let column = |index: usize| columns.get(index).copied().unwrap_or_default().trim();
        let upc = column(0);
        let ord_qty = column(1);
        let price = column(2);
        let detail = self
            .lookup
            .item_detail(scope, upc)
            .map_err(|source| BatchError::LineLookup {
                line: item_pos,
                source,
            })?
            .ok_or_else(|| BatchError::UnknownUpc {
                line: item_pos,
                upc: upc.to_string(),
            })?;
        let cost = detail.cost.unwrap_or_default();
        let tax_code = detail.tax_code.unwrap_or_default();

        let mut item = Element::new("TO_ITEM")
            .with_attr("item_pos", item_pos.to_string())
            .with_attr("item_sid", detail.item_sid.to_string())
            .with_attr("price", price)
            .with_attr("cost", cost.as_str())
            .with_attr("tax_code", tax_code.as_str());
        item.push_child(
            Element::new("INVN_BASE_ITEM")
                .with_attr("item_sid", detail.item_sid.to_string())
                .with_attr("upc", upc)
                .with_attr("style_sid", detail.style_sid.to_string())
                .with_attr("dcs_code", detail.dcs_code.unwrap_or_default())
                .with_attr("vend_code", detail.vend_code.unwrap_or_default())
                .with_attr("use_qty_decimals", "0")
                .with_attr("cost", cost)
                .with_attr("tax_code", tax_code),
        );
        let quantities = item.push_child(Element::new("TO_QTYS"));
        quantities.push_child(
            Element::new("TO_QTY")
                .with_attr("store_no", scope.as_str())
                .with_attr("ord_qty", ord_qty)
                .with_attr("rcvd_qty", "0"),
        );
        Ok(item)
    }
}
