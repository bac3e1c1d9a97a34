//! FILENAME: app/cli/src/commands.rs
//! PURPOSE: The `clean` and `defaults` subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use engine::{clean_sheets, CleaningOptions, Statistics};
use persistence::{load_xlsx, save_xlsx};

use crate::cli::CleanArgs;

/// What a finished `clean` run produced.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub output: PathBuf,
    pub sheets: usize,
    pub stats: Statistics,
}

/// `<dir>/<stem>_cleaned.xlsx` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    input.with_file_name(format!("{}_cleaned.xlsx", stem))
}

/// Resolve options from `--options`, `--options-json`, or the defaults.
pub fn load_options(args: &CleanArgs) -> Result<CleaningOptions> {
    if let Some(path) = &args.options {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read options file {}", path.display()))?;
        return CleaningOptions::from_json(&json)
            .with_context(|| format!("parse options file {}", path.display()));
    }
    if let Some(json) = &args.options_json {
        return CleaningOptions::from_json(json).context("parse --options-json");
    }
    Ok(CleaningOptions::recommended())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let options = load_options(args)?;

    let mut workbook = load_xlsx(&args.input)
        .with_context(|| format!("load workbook {}", args.input.display()))?;
    tracing::info!(
        target: "CLI",
        "loaded {} ({} sheets)",
        args.input.display(),
        workbook.sheets.len()
    );

    let stats = clean_sheets(workbook.grids_mut(), &options);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    save_xlsx(&workbook, &output)
        .with_context(|| format!("save workbook {}", output.display()))?;
    tracing::info!(target: "CLI", "wrote {}", output.display());

    if let Some(path) = &args.stats {
        std::fs::write(path, statistics_json(&stats)?)
            .with_context(|| format!("write statistics {}", path.display()))?;
    }

    Ok(CleanOutcome {
        output,
        sheets: workbook.sheets.len(),
        stats,
    })
}

/// The default options, pretty-printed.
pub fn run_defaults() -> Result<String> {
    CleaningOptions::recommended()
        .to_json_pretty()
        .context("serialize default options")
}

pub fn statistics_json(stats: &Statistics) -> Result<String> {
    serde_json::to_string_pretty(stats).context("serialize statistics")
}
