//! FILENAME: app/cli/src/cli.rs
//! PURPOSE: Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sheet-clean",
    version,
    about = "Clean spreadsheet data: dedupe, trim, convert, reformat dates and more",
    long_about = "Clean every sheet of an XLSX workbook.\n\n\
                  Stages run in a fixed order (removeDuplicates, trimSpaces, convertTypes,\n\
                  standardizeDates, fixTextCase, removeBlankRows, normalizeColumnNames,\n\
                  findAndReplace, sortData); options choose which of them are enabled."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level for diagnostics on stderr (or the log file).
    #[arg(long = "log-level", value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevelArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clean a workbook and write the result next to it.
    Clean(CleanArgs),

    /// Print the default cleaning options as JSON.
    Defaults,
}

#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Workbook to clean.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the cleaned workbook (default: <INPUT stem>_cleaned.xlsx).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Cleaning options as a JSON file (camelCase keys, see `defaults`).
    #[arg(long = "options", value_name = "JSON_FILE", conflicts_with = "options_json")]
    pub options: Option<PathBuf>,

    /// Cleaning options as an inline JSON string.
    #[arg(long = "options-json", value_name = "JSON")]
    pub options_json: Option<String>,

    /// Write statistics JSON to this file instead of stdout.
    #[arg(long = "stats", value_name = "PATH")]
    pub stats: Option<PathBuf>,
}

impl CleanArgs {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        CleanArgs {
            input: input.into(),
            output: None,
            options: None,
            options_json: None,
            stats: None,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LevelFilter::OFF,
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}
