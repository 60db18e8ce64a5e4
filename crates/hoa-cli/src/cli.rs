//! CLI argument definitions for the record import pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use hoa_import::DEFAULT_CHUNK_SIZE;
use hoa_model::EntityType;

#[derive(Parser)]
#[command(
    name = "hoa-cli",
    version,
    about = "Bulk record importer for property management data",
    long_about = "Import human-authored CSV exports into the record store.\n\n\
                  Maps arbitrary column headers onto canonical fields per entity\n\
                  type (association, property, resident, vendor), validates the\n\
                  mapping and every row, and commits records in chunks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level cell values in trace logs.
    ///
    /// Uploaded files carry personal data (names, emails, phone numbers).
    /// Without this flag, row-level values are logged as [REDACTED].
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the canonical fields for an entity type.
    Fields(FieldsArgs),

    /// Propose a column mapping for a CSV file and check it structurally.
    Map(MapArgs),

    /// Validate a CSV file and import its rows into the record store.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Entity type whose field catalog to print.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the CSV file to map.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entity type the file's rows describe.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    /// JSON file of operator overrides: {"Source Header": "target_field", ...}.
    ///
    /// Overrides replace the proposed target for the named columns. Map a
    /// column to "ignore" to drop it.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the CSV file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entity type the file's rows describe.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    /// JSON file of operator overrides: {"Source Header": "target_field", ...}.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Validate and report without committing any records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rows committed per batch.
    #[arg(long = "chunk-size", value_name = "ROWS", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Write the committed canonical records to a JSON file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI entity type choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EntityArg {
    Association,
    Property,
    Resident,
    Vendor,
}

impl From<EntityArg> for EntityType {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Association => EntityType::Association,
            EntityArg::Property => EntityType::Property,
            EntityArg::Resident => EntityType::Resident,
            EntityArg::Vendor => EntityType::Vendor,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
