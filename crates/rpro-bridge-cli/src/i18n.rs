// crates/rpro-bridge-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for English and Spanish output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The bridge CLI stores user-facing strings in a small translation catalog so
//! messages stay consistent across commands and locales. All runtime output
//! should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "rpro-bridge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.document_failed", "Failed to write document to {path}: {error}"),
    ("input.kind.inventory", "inventory file"),
    ("input.kind.transfer_order", "transfer order file"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config validated successfully."),
    ("store.open_failed", "Failed to open lookup store: {error}"),
    ("store.init.ok", "Lookup store initialized at {path}"),
    ("store.check.ok", "Lookup store at {path} is ready."),
    ("store.check.failed", "Lookup store check failed: {error}"),
    ("audit.open_failed", "Failed to open audit log at {path}: {error}"),
    ("batch.failed", "Failed to generate document: {error}"),
    ("date.format_failed", "Failed to format modified date: {error}"),
    ("inventory.generate.ok", "Inventory document written to {path} ({records} records)"),
    ("transfer_order.generate.ok", "Transfer order written to {path} ({records} items)"),
    ("sid.upc.failed", "Failed to derive SID: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Spanish catalog entries.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "rpro-bridge {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("output.document_failed", "No se pudo escribir el documento en {path}: {error}"),
    ("input.kind.inventory", "archivo de inventario"),
    ("input.kind.transfer_order", "archivo de orden de transferencia"),
    ("input.read_failed", "No se pudo leer {kind} en {path}: {error}"),
    (
        "input.read_too_large",
        "Se rechaza leer {kind} en {path} porque ocupa {size} bytes (límite {limit}).",
    ),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "Configuración validada correctamente."),
    ("store.open_failed", "No se pudo abrir el almacén de consulta: {error}"),
    ("store.init.ok", "Almacén de consulta inicializado en {path}"),
    ("store.check.ok", "El almacén de consulta en {path} está listo."),
    ("store.check.failed", "Falló la verificación del almacén de consulta: {error}"),
    ("audit.open_failed", "No se pudo abrir el registro de auditoría en {path}: {error}"),
    ("batch.failed", "Error al generar el documento: {error}"),
    ("date.format_failed", "No se pudo formatear la fecha de modificación: {error}"),
    ("inventory.generate.ok", "Documento de inventario escrito en {path} ({records} registros)"),
    ("transfer_order.generate.ok", "Orden de transferencia escrita en {path} ({records} artículos)"),
    ("sid.upc.failed", "No se pudo derivar el SID: {error}"),
    ("i18n.lang.invalid_env", "Valor no válido para {env}: {value}. Se esperaba 'en' o 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la salida que no está en inglés es traducción automática y puede ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Es => CATALOG_ES,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| entries_map(locale)),
        Locale::Es => CATALOG_ES_MAP.get_or_init(|| entries_map(locale)),
    }
}

/// Collects a locale's catalog entries into a lookup map.
fn entries_map(locale: Locale) -> HashMap<&'static str, &'static str> {
    catalog_entries_for(locale).iter().copied().collect()
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
