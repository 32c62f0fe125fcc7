// crates/rpro-bridge-cli/src/main.rs
// ============================================================================
// Module: RPro Bridge CLI Entry Point
// Description: Command dispatcher for document generation and SID utilities.
// Purpose: Provide a localized CLI over the bridge core, store, and config.
// Dependencies: clap, rpro-bridge-config, rpro-bridge-core,
//               rpro-bridge-store-sqlite, thiserror, time.
// ============================================================================

//! ## Overview
//! The bridge CLI turns delimited inventory and transfer-order files into XML
//! documents, exposes the SID derivations for inspection, and administers the
//! lookup store. All user-facing strings are routed through the i18n catalog.
//! A batch opens one read-only store connection, runs to completion or aborts
//! on the first error, and only then writes its document.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use rpro_bridge_cli::i18n::Locale;
use rpro_bridge_cli::i18n::set_locale;
use rpro_bridge_cli::output::INVENTORY_PREFIX;
use rpro_bridge_cli::output::TRANSFER_ORDER_PREFIX;
use rpro_bridge_cli::output::write_next_document;
use rpro_bridge_cli::t;
use rpro_bridge_config::AuditConfig;
use rpro_bridge_config::AuditSinkKind;
use rpro_bridge_config::RproBridgeConfig;
use rpro_bridge_config::config_toml_example;
use rpro_bridge_core::BatchAuditSink;
use rpro_bridge_core::BatchError;
use rpro_bridge_core::FileAuditSink;
use rpro_bridge_core::InventoryBatch;
use rpro_bridge_core::ItemSidMode;
use rpro_bridge_core::NoopAuditSink;
use rpro_bridge_core::StderrAuditSink;
use rpro_bridge_core::StyleSidMode;
use rpro_bridge_core::SystemEntropy;
use rpro_bridge_core::TransferOrderBatch;
use rpro_bridge_core::decode_latin1;
use rpro_bridge_core::encode_sid;
use rpro_bridge_core::sid_from_both;
use rpro_bridge_core::sid_from_desc;
use rpro_bridge_core::sid_from_upc;
use rpro_bridge_core::sid_random;
use rpro_bridge_store_sqlite::SqliteAccessMode;
use rpro_bridge_store_sqlite::SqliteLookupConfig;
use rpro_bridge_store_sqlite::SqliteLookupStore;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a delimited input file.
const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "RPRO_BRIDGE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "rpro-bridge", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `RPRO_BRIDGE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inventory document utilities.
    Inventory {
        /// Selected inventory subcommand.
        #[command(subcommand)]
        command: InventoryCommand,
    },
    /// Transfer-order document utilities.
    TransferOrder {
        /// Selected transfer-order subcommand.
        #[command(subcommand)]
        command: TransferOrderCommand,
    },
    /// SID derivation utilities.
    Sid {
        /// Selected SID subcommand.
        #[command(subcommand)]
        command: SidCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Lookup store administration utilities.
    Store {
        /// Selected store subcommand.
        #[command(subcommand)]
        command: StoreCommand,
    },
}

/// Inventory subcommands.
#[derive(Subcommand, Debug)]
enum InventoryCommand {
    /// Generate the next inventory document from a delimited file.
    Generate(GenerateCommand),
}

/// Transfer-order subcommands.
#[derive(Subcommand, Debug)]
enum TransferOrderCommand {
    /// Generate the next transfer-order document from a delimited file.
    Generate(GenerateCommand),
}

/// Arguments shared by document generation commands.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Delimited input file (Latin-1).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Optional config file path (defaults to rpro-bridge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the configured output directory.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Fixed `modified_date` value instead of the local clock.
    #[arg(long, value_name = "TIMESTAMP")]
    modified_date: Option<String>,
    /// Override the configured item SID mode (`upc`, `alu`, `random`).
    #[arg(long, value_name = "MODE")]
    item_sid_mode: Option<ItemSidMode>,
    /// Override the configured style SID mode (`desc1`, `both`, `random`).
    #[arg(long, value_name = "MODE")]
    style_sid_mode: Option<StyleSidMode>,
}

/// SID subcommands.
#[derive(Subcommand, Debug)]
enum SidCommand {
    /// Encode a raw 64-bit seed.
    Encode {
        /// Unsigned seed value.
        seed: u64,
    },
    /// Derive a SID from a numeric UPC.
    Upc {
        /// UPC digits.
        upc: String,
    },
    /// Derive a SID from a description.
    Desc {
        /// Description text.
        text: String,
    },
    /// Derive a SID from two concatenated descriptions.
    Both {
        /// First description.
        desc1: String,
        /// Second description.
        desc2: String,
    },
    /// Generate a time and counter based SID.
    Random,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a bridge configuration file.
    Validate(ConfigPathCommand),
    /// Print the canonical example configuration.
    Example,
}

/// Store subcommands.
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Create (or validate) a lookup database with the current schema.
    Init(StoreInitCommand),
    /// Open the configured lookup database read-only and run a test query.
    Check(ConfigPathCommand),
}

/// Arguments for commands that only need a config path.
#[derive(Args, Debug)]
struct ConfigPathCommand {
    /// Optional config file path (defaults to rpro-bridge.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `store init`.
#[derive(Args, Debug)]
struct StoreInitCommand {
    /// Path of the database file.
    #[arg(long, value_name = "DB")]
    path: PathBuf,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

/// Document kinds produced by the generate commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    /// `DOCUMENT/INVENTORYS`.
    Inventory,
    /// `DOCUMENT/TO`.
    TransferOrder,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Inventory {
            command: InventoryCommand::Generate(command),
        } => command_generate(DocumentKind::Inventory, &command),
        Commands::TransferOrder {
            command: TransferOrderCommand::Generate(command),
        } => command_generate(DocumentKind::TransferOrder, &command),
        Commands::Sid {
            command,
        } => command_sid(command),
        Commands::Config {
            command,
        } => command_config(&command),
        Commands::Store {
            command,
        } => command_store(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Generate Commands
// ============================================================================

/// Executes `inventory generate` or `transfer-order generate`.
fn command_generate(kind: DocumentKind, command: &GenerateCommand) -> CliResult<ExitCode> {
    let config = RproBridgeConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let input_kind = match kind {
        DocumentKind::Inventory => t!("input.kind.inventory"),
        DocumentKind::TransferOrder => t!("input.kind.transfer_order"),
    };
    let bytes = read_input(&command.input, &input_kind)?;
    let text = decode_latin1(&bytes);
    let modified_date = match &command.modified_date {
        Some(value) => value.clone(),
        None => local_timestamp()?,
    };
    let mut sid_config = config.sid_generator;
    if let Some(mode) = command.item_sid_mode {
        sid_config.item_sid_mode = mode;
    }
    if let Some(mode) = command.style_sid_mode {
        sid_config.style_sid_mode = mode;
    }
    let context = config.batch_context(modified_date).with_sid_config(sid_config);
    let lookup_config = config
        .lookup_config()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let store = SqliteLookupStore::open(&lookup_config)
        .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
    let audit = open_audit_sink(&config.audit)?;
    let entropy = SystemEntropy;

    let (document, prefix) = match kind {
        DocumentKind::Inventory => {
            let template = config
                .inventory_template()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            let batch =
                InventoryBatch::new(&store, &entropy, audit.as_ref(), &template, &context);
            (batch.generate(&text).map_err(batch_error)?, INVENTORY_PREFIX)
        }
        DocumentKind::TransferOrder => {
            let template = config
                .transfer_order_template()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            let batch =
                TransferOrderBatch::new(&store, &entropy, audit.as_ref(), &template, &context);
            (batch.generate(&text).map_err(batch_error)?, TRANSFER_ORDER_PREFIX)
        }
    };
    drop(store);

    let output_dir = command.output_dir.clone().unwrap_or_else(|| config.csv.output_dir.clone());
    let path = write_next_document(&output_dir, prefix, &document.render()).map_err(|err| {
        CliError::new(t!("output.document_failed", path = output_dir.display(), error = err))
    })?;
    let message = match kind {
        DocumentKind::Inventory => {
            t!("inventory.generate.ok", path = path.display(), records = document.records)
        }
        DocumentKind::TransferOrder => {
            t!("transfer_order.generate.ok", path = path.display(), records = document.records)
        }
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Maps a batch failure to a localized error.
fn batch_error(err: BatchError) -> CliError {
    CliError::new(t!("batch.failed", error = err))
}

/// Builds the configured audit sink.
fn open_audit_sink(config: &AuditConfig) -> CliResult<Box<dyn BatchAuditSink>> {
    match (config.sink, &config.path) {
        (AuditSinkKind::File, Some(path)) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        (AuditSinkKind::Stderr, _) => Ok(Box::new(StderrAuditSink)),
        (AuditSinkKind::None | AuditSinkKind::File, _) => Ok(Box::new(NoopAuditSink)),
    }
}

/// Formats the local wall-clock time as `YYYY-MM-DDTHH:MM:SS`.
fn local_timestamp() -> CliResult<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

/// Formats a timestamp in the document `modified_date` layout.
fn format_timestamp(value: OffsetDateTime) -> CliResult<String> {
    value
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .map_err(|err| CliError::new(t!("date.format_failed", error = err)))
}

// ============================================================================
// SECTION: SID Commands
// ============================================================================

/// Executes the SID derivation subcommands.
fn command_sid(command: SidCommand) -> CliResult<ExitCode> {
    let sid = match command {
        SidCommand::Encode {
            seed,
        } => encode_sid(seed),
        SidCommand::Upc {
            upc,
        } => sid_from_upc(&upc).map_err(|err| CliError::new(t!("sid.upc.failed", error = err)))?,
        SidCommand::Desc {
            text,
        } => sid_from_desc(&text),
        SidCommand::Both {
            desc1,
            desc2,
        } => sid_from_both(&desc1, &desc2),
        SidCommand::Random => sid_random(&SystemEntropy),
    };
    write_stdout_line(&sid.to_string())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            RproBridgeConfig::load(command.config.as_deref())
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            write_stdout_line(&t!("config.validate.ok"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Store Commands
// ============================================================================

/// Dispatches store subcommands.
fn command_store(command: &StoreCommand) -> CliResult<ExitCode> {
    match command {
        StoreCommand::Init(command) => {
            let config = SqliteLookupConfig::new(&command.path, SqliteAccessMode::ReadWrite);
            let store = SqliteLookupStore::open(&config)
                .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
            drop(store);
            write_stdout_line(&t!("store.init.ok", path = command.path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        StoreCommand::Check(command) => {
            let config = RproBridgeConfig::load(command.config.as_deref())
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            let mut lookup_config = config
                .lookup_config()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            lookup_config.access = SqliteAccessMode::ReadOnly;
            let store = SqliteLookupStore::open(&lookup_config)
                .map_err(|err| CliError::new(t!("store.check.failed", error = err)))?;
            store.check().map_err(|err| CliError::new(t!("store.check.failed", error = err)))?;
            write_stdout_line(&t!("store.check.ok", path = lookup_config.path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads a delimited input file with the CLI size limit.
fn read_input(path: &Path, kind: &str) -> CliResult<Vec<u8>> {
    read_bytes_with_limit(path, MAX_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(error) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = error))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
