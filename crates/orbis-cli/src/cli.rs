//! CLI argument definitions for Orbis.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use orbis_cli::overrides::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "orbis",
    version,
    about = "Orbis - merge, clean and validate a folder of CSV files",
    long_about = "Merge every CSV file of a folder into one table, clean it and \
                  validate the result.\n\n\
                  Writes the merged and cleaned tables plus per-column and issue \
                  reports into a new run directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow raw cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge, clean and validate the CSV files of a folder.
    Run(RunArgs),

    /// List the runs recorded in an output folder, latest last.
    Runs(RunsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing the source CSV files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Folder receiving run directories (default: <INPUT_DIR>/orbis_output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with pipeline settings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum fraction of parseable values for a column to become numeric.
    #[arg(long = "coercion-threshold", value_name = "FRACTION")]
    pub coercion_threshold: Option<f64>,

    /// Null fraction above which a column is flagged.
    #[arg(long = "null-rate-threshold", value_name = "FRACTION")]
    pub null_rate_threshold: Option<f64>,

    /// Numeric fraction above which a text column is flagged as mixed.
    #[arg(long = "mixed-type-threshold", value_name = "FRACTION")]
    pub mixed_type_threshold: Option<f64>,

    /// Name of the column recording each row's source file.
    #[arg(long = "provenance-column", value_name = "NAME")]
    pub provenance_column: Option<String>,

    /// Skip writing the raw merged table.
    #[arg(long = "no-raw-export")]
    pub no_raw_export: bool,

    /// Run and report without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also export the run into this DuckDB database.
    #[arg(long = "duckdb", value_name = "PATH")]
    pub duckdb: Option<PathBuf>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            coercion_threshold: self.coercion_threshold,
            null_rate_threshold: self.null_rate_threshold,
            mixed_type_threshold: self.mixed_type_threshold,
            provenance_column: self.provenance_column.clone(),
            no_raw_export: self.no_raw_export,
        }
    }
}

#[derive(Parser)]
pub struct RunsArgs {
    /// Output folder holding run directories.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
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
