// crates/rpro-bridge-config/src/config.rs
// ============================================================================
// Module: RPro Bridge Configuration
// Description: Configuration loading and validation for the bridge.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: rpro-bridge-core, rpro-bridge-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed: unknown SID modes, unusable
//! delimiters, and templates that do not resolve against their catalog are
//! rejected at load time instead of surfacing mid-batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use rpro_bridge_core::BatchContext;
use rpro_bridge_core::FieldSpec;
use rpro_bridge_core::InventoryTemplate;
use rpro_bridge_core::ScopeId;
use rpro_bridge_core::SidGeneratorConfig;
use rpro_bridge_core::TransferOrderTemplate;
use rpro_bridge_store_sqlite::SqliteAccessMode;
use rpro_bridge_store_sqlite::SqliteLookupConfig;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "rpro-bridge.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "RPRO_BRIDGE_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the subsidiary scope.
const MAX_SCOPE_LENGTH: usize = 16;
/// Delimiters accepted for input files.
const ALLOWED_DELIMITERS: [char; 3] = [',', ';', '|'];
/// Default output directory for generated documents.
const DEFAULT_OUTPUT_DIR: &str = "Salida";

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RproBridgeConfig {
    /// Business-unit scope.
    #[serde(default)]
    pub scope: ScopeConfig,
    /// Delimited input and output settings.
    #[serde(default)]
    pub csv: CsvConfig,
    /// SID generation modes.
    #[serde(default)]
    pub sid_generator: SidGeneratorConfig,
    /// Lookup database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Inventory catalog and template.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Transfer-order catalog and templates.
    #[serde(default)]
    pub transfer_orders: TransferOrderConfig,
    /// Audit output settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl RproBridgeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scope.validate()?;
        self.csv.validate()?;
        self.database.validate()?;
        self.inventory.validate()?;
        self.transfer_orders.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Builds the batch context snapshot for one run.
    #[must_use]
    pub fn batch_context(&self, modified_date: impl Into<String>) -> BatchContext {
        BatchContext::new(self.scope.sbs_no.clone(), modified_date)
            .with_delimiter(self.csv.delimiter)
            .with_sid_config(self.sid_generator)
    }

    /// Resolves the inventory template against its catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no template is configured or it does not
    /// resolve.
    pub fn inventory_template(&self) -> Result<InventoryTemplate, ConfigError> {
        if self.inventory.template.is_empty() {
            return Err(ConfigError::Invalid("inventory.template is not configured".to_string()));
        }
        InventoryTemplate::resolve(&self.inventory.catalog, &self.inventory.template)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Resolves the transfer-order templates against their catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the templates are not configured or do not
    /// resolve.
    pub fn transfer_order_template(&self) -> Result<TransferOrderTemplate, ConfigError> {
        let section = &self.transfer_orders;
        if section.header.is_empty() || section.detail.is_empty() {
            return Err(ConfigError::Invalid(
                "transfer_orders.header and transfer_orders.detail must be configured".to_string(),
            ));
        }
        TransferOrderTemplate::resolve(&section.catalog, &section.header, &section.detail)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Returns the lookup store settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no database path is configured.
    pub fn lookup_config(&self) -> Result<SqliteLookupConfig, ConfigError> {
        let path = self
            .database
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("database.path is not configured".to_string()))?;
        Ok(SqliteLookupConfig {
            path: path.clone(),
            busy_timeout_ms: self.database.busy_timeout_ms,
            access: self.database.access,
        })
    }
}

/// Business-unit scope configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeConfig {
    /// Subsidiary number every lookup is scoped to.
    #[serde(default)]
    pub sbs_no: ScopeId,
}

impl ScopeConfig {
    /// Validates scope configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let value = self.sbs_no.as_str();
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid("scope.sbs_no must be non-empty".to_string()));
        }
        if value.len() > MAX_SCOPE_LENGTH {
            return Err(ConfigError::Invalid("scope.sbs_no exceeds max length".to_string()));
        }
        Ok(())
    }
}

/// Delimited input and output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Directory generated documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            output_dir: default_output_dir(),
        }
    }
}

impl CsvConfig {
    /// Validates delimited input configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !ALLOWED_DELIMITERS.contains(&self.delimiter) {
            return Err(ConfigError::Invalid(format!(
                "csv.delimiter must be one of , ; | (got {:?})",
                self.delimiter
            )));
        }
        validate_path_string("csv.output_dir", &self.output_dir.to_string_lossy())
    }
}

/// Lookup database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` database path.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Access mode for batch runs.
    #[serde(default)]
    pub access: SqliteAccessMode,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            access: SqliteAccessMode::default(),
        }
    }
}

impl DatabaseConfig {
    /// Validates database configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("database.path", &path.to_string_lossy())?;
        }
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.busy_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inventory catalog and template configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    /// Field catalog.
    #[serde(default)]
    pub catalog: Vec<FieldSpec>,
    /// Ordered field codes of the input columns.
    #[serde(default)]
    pub template: Vec<String>,
}

impl InventoryConfig {
    /// Validates inventory configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog("inventory.catalog", &self.catalog)?;
        if !self.template.is_empty() {
            InventoryTemplate::resolve(&self.catalog, &self.template)
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(())
    }
}

/// Transfer-order catalog and template configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferOrderConfig {
    /// Field catalog.
    #[serde(default)]
    pub catalog: Vec<FieldSpec>,
    /// Ordered header field codes.
    #[serde(default)]
    pub header: Vec<String>,
    /// Ordered detail field codes.
    #[serde(default)]
    pub detail: Vec<String>,
}

impl TransferOrderConfig {
    /// Validates transfer-order configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog("transfer_orders.catalog", &self.catalog)?;
        match (self.header.is_empty(), self.detail.is_empty()) {
            (true, true) => Ok(()),
            (false, false) => {
                TransferOrderTemplate::resolve(&self.catalog, &self.header, &self.detail)
                    .map(|_| ())
                    .map_err(|err| ConfigError::Invalid(err.to_string()))
            }
            _ => Err(ConfigError::Invalid(
                "transfer_orders.header and transfer_orders.detail must be set together"
                    .to_string(),
            )),
        }
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Audit disabled.
    None,
}

/// Audit output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("file audit sink requires audit.path".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates catalog entries: non-empty codes, no duplicates, positive limits.
fn validate_catalog(field: &str, catalog: &[FieldSpec]) -> Result<(), ConfigError> {
    for (index, spec) in catalog.iter().enumerate() {
        if spec.rpro.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{field}[{index}].rpro must be non-empty")));
        }
        if spec.len == Some(0) {
            return Err(ConfigError::Invalid(format!(
                "{field}[{index}].len must be greater than zero"
            )));
        }
        if catalog.iter().take(index).any(|earlier| earlier.rpro == spec.rpro) {
            return Err(ConfigError::Invalid(format!(
                "{field} lists {} more than once",
                spec.rpro
            )));
        }
    }
    Ok(())
}

/// Returns the default field delimiter.
const fn default_delimiter() -> char {
    ','
}

/// Returns the default output directory.
fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Returns the default busy timeout for the lookup database.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}
