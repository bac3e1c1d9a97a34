//! FILENAME: app/cli/src/lib.rs
//! PURPOSE: Library side of the `sheet-clean` binary.
//! CONTEXT: Kept separate from main.rs so the integration tests can drive the
//! commands without spawning a process.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{CleanArgs, Cli, Command, LogLevelArg};
pub use commands::{
    default_output_path, load_options, run_clean, run_defaults, statistics_json, CleanOutcome,
};
