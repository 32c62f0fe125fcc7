// crates/rpro-bridge-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Lookup Store
// Description: Exact-match item, style, DCS, and vendor lookups over SQLite.
// Purpose: Back the resolution policy and batch builders with a real database.
// Dependencies: rpro-bridge-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! The store mirrors the inventory tables the batches read:
//!
//! - `invn_sbs`: one row per item, keyed by (`sbs_no`, `local_upc`).
//! - `dcs`: DCS codes with an optional tax code.
//! - `vendor`: vendor codes.
//!
//! A `store_meta` table carries the schema version; opening a database with
//! any other version fails closed. Read-only access opens the file with
//! `SQLITE_OPEN_READ_ONLY` and sets `query_only`, so a batch can never write.
//! The connection lives as long as the store handle and closes on drop.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use rpro_bridge_core::ItemDetail;
use rpro_bridge_core::LookupError;
use rpro_bridge_core::ReferenceLookup;
use rpro_bridge_core::ScopeId;
use rpro_bridge_core::Sid;
use rpro_bridge_core::SidLookup;
use rpro_bridge_core::StoredItemStyle;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use rusqlite::types::Value;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
pub const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Access mode for the lookup store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteAccessMode {
    /// Queries only; the database must already exist.
    #[default]
    ReadOnly,
    /// Creates and initialises the schema and accepts inserts.
    ReadWrite,
}

/// Configuration for the `SQLite` lookup store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteLookupConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Access mode.
    #[serde(default)]
    pub access: SqliteAccessMode,
}

impl SqliteLookupConfig {
    /// Creates a configuration with default timeout and the given access mode.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, access: SqliteAccessMode) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            access,
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` lookup store errors.
#[derive(Debug, Error)]
pub enum SqliteLookupError {
    /// Store I/O error.
    #[error("sqlite lookup io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite lookup db error: {0}")]
    Db(String),
    /// Stored data has an unexpected shape.
    #[error("sqlite lookup corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite lookup version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid configuration or request.
    #[error("sqlite lookup invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteLookupError> for LookupError {
    fn from(error: SqliteLookupError) -> Self {
        match error {
            SqliteLookupError::Io(message) => Self::Io(message),
            SqliteLookupError::Db(message) => Self::Query(message),
            SqliteLookupError::Corrupt(message) => Self::Corrupt(message),
            SqliteLookupError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteLookupError::Invalid(message) => Self::Invalid(message),
        }
    }
}

// ============================================================================
// SECTION: Rows
// ============================================================================

/// Item row written by seeding inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteItemRow {
    /// Item UPC.
    pub upc: String,
    /// Optional ALU.
    pub alu: Option<String>,
    /// Description 1.
    pub description1: String,
    /// Description 2.
    pub description2: String,
    /// Stored SIDs and reference attributes.
    pub detail: ItemDetail,
}

impl SqliteItemRow {
    /// Creates a row with SIDs and descriptions only.
    #[must_use]
    pub fn new(
        upc: impl Into<String>,
        description1: impl Into<String>,
        style_sid: Sid,
        item_sid: Sid,
    ) -> Self {
        Self {
            upc: upc.into(),
            alu: None,
            description1: description1.into(),
            description2: String::new(),
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

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed lookup store.
#[derive(Clone)]
pub struct SqliteLookupStore {
    /// Access mode the connection was opened with.
    access: SqliteAccessMode,
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteLookupStore {
    /// Opens the lookup store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteLookupError`] when the path is invalid, the database
    /// cannot be opened, or its schema version is unsupported.
    pub fn open(config: &SqliteLookupConfig) -> Result<Self, SqliteLookupError> {
        validate_store_path(&config.path)?;
        let connection = match config.access {
            SqliteAccessMode::ReadOnly => {
                if !config.path.is_file() {
                    return Err(SqliteLookupError::Io(format!(
                        "store database not found: {}",
                        config.path.display()
                    )));
                }
                let connection = open_connection(config)?;
                verify_schema(&connection)?;
                connection
            }
            SqliteAccessMode::ReadWrite => {
                ensure_parent_dir(&config.path)?;
                let mut connection = open_connection(config)?;
                initialize_schema(&mut connection)?;
                connection
            }
        };
        Ok(Self {
            access: config.access,
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Returns the access mode.
    #[must_use]
    pub const fn access(&self) -> SqliteAccessMode {
        self.access
    }

    /// Inserts an item row.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteLookupError`] when the store is read-only or the
    /// insert fails.
    pub fn insert_item(&self, scope: &ScopeId, row: &SqliteItemRow) -> Result<(), SqliteLookupError> {
        let guard = self.writer()?;
        guard
            .execute(
                "INSERT INTO invn_sbs (sbs_no, local_upc, alu, style_sid, item_sid, description1, \
                 description2, cost, tax_code, dcs_code, vend_code) VALUES (?1, ?2, ?3, ?4, ?5, \
                 ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    scope.as_str(),
                    row.upc,
                    row.alu,
                    row.detail.style_sid.get(),
                    row.detail.item_sid.get(),
                    row.description1,
                    row.description2,
                    row.detail.cost,
                    row.detail.tax_code,
                    row.detail.dcs_code,
                    row.detail.vend_code
                ],
            )
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }

    /// Inserts a DCS code with an optional tax code.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteLookupError`] when the store is read-only or the
    /// insert fails.
    pub fn insert_dcs(
        &self,
        scope: &ScopeId,
        dcs_code: &str,
        tax_code: Option<&str>,
    ) -> Result<(), SqliteLookupError> {
        let guard = self.writer()?;
        guard
            .execute(
                "INSERT INTO dcs (sbs_no, dcs_code, tax_code) VALUES (?1, ?2, ?3)",
                params![scope.as_str(), dcs_code, tax_code],
            )
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }

    /// Inserts a vendor code.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteLookupError`] when the store is read-only or the
    /// insert fails.
    pub fn insert_vendor(&self, scope: &ScopeId, vend_code: &str) -> Result<(), SqliteLookupError> {
        let guard = self.writer()?;
        guard
            .execute(
                "INSERT INTO vendor (sbs_no, vend_code) VALUES (?1, ?2)",
                params![scope.as_str(), vend_code],
            )
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }

    /// Runs a trivial query to confirm the connection is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteLookupError`] when the query fails.
    pub fn check(&self) -> Result<(), SqliteLookupError> {
        let guard = self.lock()?;
        let _: i64 = guard
            .query_row("SELECT 1", params![], |row| row.get(0))
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(())
    }

    /// Locks the connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteLookupError> {
        self.connection.lock().map_err(|_| SqliteLookupError::Db("mutex poisoned".to_string()))
    }

    /// Locks the connection for a write, rejecting read-only stores.
    fn writer(&self) -> Result<MutexGuard<'_, Connection>, SqliteLookupError> {
        if self.access == SqliteAccessMode::ReadOnly {
            return Err(SqliteLookupError::Invalid("store opened read-only".to_string()));
        }
        self.lock()
    }

    /// Loads the stored SID pair for a UPC.
    fn load_item_style(
        &self,
        scope: &ScopeId,
        upc: &str,
    ) -> Result<Option<StoredItemStyle>, SqliteLookupError> {
        let guard = self.lock()?;
        let row: Option<(i64, i64)> = guard
            .query_row(
                "SELECT style_sid, item_sid FROM invn_sbs WHERE sbs_no = ?1 AND local_upc = ?2 \
                 ORDER BY rowid LIMIT 1",
                params![scope.as_str(), upc],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(row.map(|(style_sid, item_sid)| StoredItemStyle {
            style_sid: Sid::from_raw(style_sid),
            item_sid: Sid::from_raw(item_sid),
        }))
    }

    /// Loads the earliest stored style SID for a description 1.
    fn load_style_by_description(
        &self,
        scope: &ScopeId,
        description1: &str,
    ) -> Result<Option<Sid>, SqliteLookupError> {
        let guard = self.lock()?;
        let style_sid: Option<i64> = guard
            .query_row(
                "SELECT style_sid FROM invn_sbs WHERE sbs_no = ?1 AND description1 = ?2 ORDER BY \
                 rowid LIMIT 1",
                params![scope.as_str(), description1],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(style_sid.map(Sid::from_raw))
    }

    /// Returns true when a query yields at least one row.
    fn exists(&self, sql: &str, scope: &ScopeId, code: &str) -> Result<bool, SqliteLookupError> {
        let guard = self.lock()?;
        let found: Option<i64> = guard
            .query_row(sql, params![scope.as_str(), code], |row| row.get(0))
            .optional()
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        Ok(found.is_some())
    }

    /// Loads the tax code stored for a DCS code.
    fn load_dcs_tax_code(
        &self,
        scope: &ScopeId,
        dcs_code: &str,
    ) -> Result<Option<String>, SqliteLookupError> {
        let guard = self.lock()?;
        let tax_code: Option<Value> = guard
            .query_row(
                "SELECT tax_code FROM dcs WHERE sbs_no = ?1 AND dcs_code = ?2",
                params![scope.as_str(), dcs_code],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        tax_code.map_or(Ok(None), |value| value_to_text("dcs.tax_code", value))
    }

    /// Loads the stored detail of an item.
    fn load_item_detail(
        &self,
        scope: &ScopeId,
        upc: &str,
    ) -> Result<Option<ItemDetail>, SqliteLookupError> {
        let guard = self.lock()?;
        let row: Option<(i64, i64, Value, Value, Value, Value)> = guard
            .query_row(
                "SELECT style_sid, item_sid, cost, tax_code, dcs_code, vend_code FROM invn_sbs \
                 WHERE sbs_no = ?1 AND local_upc = ?2 ORDER BY rowid LIMIT 1",
                params![scope.as_str(), upc],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        drop(guard);
        let Some((style_sid, item_sid, cost, tax_code, dcs_code, vend_code)) = row else {
            return Ok(None);
        };
        Ok(Some(ItemDetail {
            style_sid: Sid::from_raw(style_sid),
            item_sid: Sid::from_raw(item_sid),
            cost: value_to_text("invn_sbs.cost", cost)?,
            tax_code: value_to_text("invn_sbs.tax_code", tax_code)?,
            dcs_code: value_to_text("invn_sbs.dcs_code", dcs_code)?,
            vend_code: value_to_text("invn_sbs.vend_code", vend_code)?,
        }))
    }
}

impl SidLookup for SqliteLookupStore {
    fn lookup_item_style(
        &self,
        scope: &ScopeId,
        upc: &str,
    ) -> Result<Option<StoredItemStyle>, LookupError> {
        self.load_item_style(scope, upc).map_err(LookupError::from)
    }

    fn lookup_style_by_description(
        &self,
        scope: &ScopeId,
        description1: &str,
    ) -> Result<Option<Sid>, LookupError> {
        self.load_style_by_description(scope, description1).map_err(LookupError::from)
    }

    fn readiness(&self) -> Result<(), LookupError> {
        self.check().map_err(LookupError::from)
    }
}

impl ReferenceLookup for SqliteLookupStore {
    fn dcs_exists(&self, scope: &ScopeId, dcs_code: &str) -> Result<bool, LookupError> {
        self.exists("SELECT 1 FROM dcs WHERE sbs_no = ?1 AND dcs_code = ?2", scope, dcs_code)
            .map_err(LookupError::from)
    }

    fn vendor_exists(&self, scope: &ScopeId, vend_code: &str) -> Result<bool, LookupError> {
        self.exists("SELECT 1 FROM vendor WHERE sbs_no = ?1 AND vend_code = ?2", scope, vend_code)
            .map_err(LookupError::from)
    }

    fn dcs_tax_code(
        &self,
        scope: &ScopeId,
        dcs_code: &str,
    ) -> Result<Option<String>, LookupError> {
        self.load_dcs_tax_code(scope, dcs_code).map_err(LookupError::from)
    }

    fn item_detail(&self, scope: &ScopeId, upc: &str) -> Result<Option<ItemDetail>, LookupError> {
        self.load_item_detail(scope, upc).map_err(LookupError::from)
    }

    fn readiness(&self) -> Result<(), LookupError> {
        self.check().map_err(LookupError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a nullable scalar column as text.
fn value_to_text(column: &str, value: Value) -> Result<Option<String>, SqliteLookupError> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(number) => Ok(Some(number.to_string())),
        Value::Real(number) => Ok(Some(number.to_string())),
        Value::Text(text) => Ok(Some(text)),
        Value::Blob(_) => Err(SqliteLookupError::Corrupt(format!("{column} holds a blob"))),
    }
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteLookupError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteLookupError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteLookupError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteLookupError> {
    let path_string = path.display().to_string();
    if path_string.is_empty() {
        return Err(SqliteLookupError::Invalid("store path is empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteLookupError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteLookupError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteLookupError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection for the configured access mode.
fn open_connection(config: &SqliteLookupConfig) -> Result<Connection, SqliteLookupError> {
    let flags = match config.access {
        SqliteAccessMode::ReadOnly => {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_FULL_MUTEX
        }
        SqliteAccessMode::ReadWrite => {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX
        }
    };
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies connection pragmas for the configured access mode.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteLookupConfig,
) -> Result<(), SqliteLookupError> {
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    let pragma = match config.access {
        SqliteAccessMode::ReadOnly => "PRAGMA query_only = ON;",
        SqliteAccessMode::ReadWrite => "PRAGMA foreign_keys = ON;",
    };
    connection.execute_batch(pragma).map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    Ok(())
}

/// Reads the stored schema version, if the meta table exists.
fn stored_version(connection: &Connection) -> Result<Option<i64>, SqliteLookupError> {
    let has_meta: Option<String> = connection
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'store_meta'",
            params![],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    if has_meta.is_none() {
        return Ok(None);
    }
    connection
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteLookupError::Db(err.to_string()))
}

/// Verifies the schema version of an existing database.
fn verify_schema(connection: &Connection) -> Result<(), SqliteLookupError> {
    match stored_version(connection)? {
        Some(version) if version == SCHEMA_VERSION => Ok(()),
        Some(version) => Err(SqliteLookupError::VersionMismatch(format!(
            "unsupported schema version: {version}"
        ))),
        None => Err(SqliteLookupError::VersionMismatch(
            "store schema is not initialized".to_string(),
        )),
    }
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteLookupError> {
    let tx = connection.transaction().map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS invn_sbs (
                    sbs_no TEXT NOT NULL,
                    local_upc TEXT NOT NULL,
                    alu TEXT,
                    style_sid INTEGER NOT NULL,
                    item_sid INTEGER NOT NULL,
                    description1 TEXT NOT NULL DEFAULT '',
                    description2 TEXT NOT NULL DEFAULT '',
                    cost TEXT,
                    tax_code TEXT,
                    dcs_code TEXT,
                    vend_code TEXT,
                    UNIQUE (sbs_no, local_upc)
                );
                CREATE INDEX IF NOT EXISTS idx_invn_sbs_description1
                    ON invn_sbs (sbs_no, description1);
                CREATE TABLE IF NOT EXISTS dcs (
                    sbs_no TEXT NOT NULL,
                    dcs_code TEXT NOT NULL,
                    tax_code TEXT,
                    PRIMARY KEY (sbs_no, dcs_code)
                );
                CREATE TABLE IF NOT EXISTS vendor (
                    sbs_no TEXT NOT NULL,
                    vend_code TEXT NOT NULL,
                    PRIMARY KEY (sbs_no, vend_code)
                );",
            )
            .map_err(|err| SqliteLookupError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteLookupError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteLookupError::Db(err.to_string()))?;
    Ok(())
}
