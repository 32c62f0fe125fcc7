// crates/rpro-bridge-core/src/core/mod.rs
// ============================================================================
// Module: RPro Bridge Core Types
// Description: SID codec, seed derivation, records, catalogs, and documents.
// Purpose: Provide stable, serializable types shared by every RPro Bridge crate.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! Core types define the SID encoding, the seed derivation strategies, the
//! generation policy configuration, field catalogs, line validation, and the
//! document tree emitted for the inventory system. Nothing here performs I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod document;
pub mod identifiers;
pub mod modes;
pub mod record;
pub mod seed;
pub mod sid;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::FieldSection;
pub use catalog::FieldSpec;
pub use catalog::InventoryTemplate;
pub use catalog::TemplateError;
pub use catalog::TemplateField;
pub use catalog::TransferOrderTemplate;
pub use document::Element;
pub use document::render_xml;
pub use identifiers::DEFAULT_SCOPE;
pub use identifiers::ScopeId;
pub use modes::ItemSidMode;
pub use modes::SidGeneratorConfig;
pub use modes::StyleSidMode;
pub use modes::UnknownModeError;
pub use record::InventoryRecord;
pub use record::Resolution;
pub use record::SidSource;
pub use seed::DESCRIPTION_SEED_CHARS;
pub use seed::MAX_COUNTER;
pub use seed::SeedError;
pub use seed::random_seed;
pub use seed::seed_from_description;
pub use seed::seed_from_descriptions;
pub use seed::seed_from_upc;
pub use seed::sid_from_both;
pub use seed::sid_from_desc;
pub use seed::sid_from_upc;
pub use sid::Sid;
pub use sid::encode_sid;
pub use validation::LineError;
pub use validation::decode_latin1;
pub use validation::split_fields;
pub use validation::validate_fields;
pub use validation::validate_lines;
