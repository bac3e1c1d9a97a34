//! FILENAME: core/engine/src/clean/mod.rs
//! PURPOSE: The cleaning pipeline: stage registry and orchestrator.
//! CONTEXT: `clean` owns the grid for the whole run and threads it through
//! every enabled stage in `Stage::ORDER`. Stages report a count; the counts
//! are folded into `Statistics` at the end. Nothing in here returns an error:
//! bad sub-options fall back to defaults inside the stages. The missing-value
//! and row-filter stages sit inside the core order (after blank removal and
//! after find/replace) and report through their own counters.

pub mod blanks;
pub mod case;
pub mod convert;
pub mod dates;
pub mod dedup;
pub mod filter;
pub mod headers;
pub mod missing;
pub mod options;
pub mod replace;
pub mod sort;
pub mod stats;
pub mod trim;

#[cfg(test)]
mod tests;

pub use options::{
    CaseStyle, CleaningOptions, FilterCondition, MissingStrategy, Replacement, SortColumn,
    SortOrder,
};
pub use stats::{Shape, StageDelta, Statistics};

use crate::grid::Grid;

// ============================================================================
// STAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    RemoveDuplicates,
    TrimSpaces,
    ConvertTypes,
    StandardizeDates,
    FixTextCase,
    RemoveBlanks,
    HandleMissing,
    NormalizeColumnNames,
    FindAndReplace,
    FilterRows,
    SortData,
}

impl Stage {
    /// Application order, independent of which stages are enabled.
    pub const ORDER: [Stage; 11] = [
        Stage::RemoveDuplicates,
        Stage::TrimSpaces,
        Stage::ConvertTypes,
        Stage::StandardizeDates,
        Stage::FixTextCase,
        Stage::RemoveBlanks,
        Stage::HandleMissing,
        Stage::NormalizeColumnNames,
        Stage::FindAndReplace,
        Stage::FilterRows,
        Stage::SortData,
    ];

    /// The option flag name that enables this stage.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::RemoveDuplicates => "removeDuplicates",
            Stage::TrimSpaces => "trimSpaces",
            Stage::ConvertTypes => "convertTypes",
            Stage::StandardizeDates => "standardizeDates",
            Stage::FixTextCase => "fixTextCase",
            Stage::RemoveBlanks => "removeBlankRows",
            Stage::HandleMissing => "handleMissing",
            Stage::NormalizeColumnNames => "normalizeColumnNames",
            Stage::FindAndReplace => "findAndReplace",
            Stage::FilterRows => "filterConditions",
            Stage::SortData => "sortData",
        }
    }

    pub fn is_enabled(&self, options: &CleaningOptions) -> bool {
        match self {
            Stage::RemoveDuplicates => options.remove_duplicates,
            Stage::TrimSpaces => options.trim_spaces,
            Stage::ConvertTypes => options.convert_types,
            Stage::StandardizeDates => options.standardize_dates,
            Stage::FixTextCase => options.fix_text_case,
            Stage::RemoveBlanks => options.remove_blank_rows,
            Stage::HandleMissing => options.handle_missing,
            Stage::NormalizeColumnNames => options.normalize_column_names,
            Stage::FindAndReplace => {
                options.find_and_replace && !options.replacements().is_empty()
            }
            Stage::FilterRows => options.filter_conditions().is_some(),
            Stage::SortData => options.sort_data,
        }
    }

    /// Run this stage against the grid and return its count.
    pub fn apply(&self, grid: &mut Grid, options: &CleaningOptions) -> usize {
        match self {
            Stage::RemoveDuplicates => dedup::remove_duplicates(grid, options.duplicate_keys()),
            Stage::TrimSpaces => trim::trim_spaces(grid),
            Stage::ConvertTypes => convert::convert_types(grid),
            Stage::StandardizeDates => dates::standardize_dates(
                grid,
                &options.date_format(),
                options.date_columns(),
                options.date_serials,
            ),
            Stage::FixTextCase => case::fix_text_case(
                grid,
                &options.header_case(),
                &options.text_case(),
                options.case_columns(),
            ),
            Stage::RemoveBlanks => blanks::remove_blank_rows_and_columns(grid),
            Stage::HandleMissing => {
                missing::handle_missing(grid, options.missing_strategy(), options.fill_value())
            }
            Stage::NormalizeColumnNames => headers::normalize_column_names(grid),
            Stage::FindAndReplace => replace::find_and_replace(
                grid,
                options.replacements(),
                options.replace_columns(),
            ),
            Stage::FilterRows => options
                .filter_conditions()
                .map_or(0, |conditions| filter::filter_rows(grid, conditions)),
            Stage::SortData => {
                sort::sort_data(grid, &options.sort_column(), options.sort_order());
                0
            }
        }
    }
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Clean one grid. Row 0 is the header.
pub fn clean(grid: Grid, options: &CleaningOptions) -> (Grid, Statistics) {
    if grid.is_empty() {
        log::debug!(target: "CLEAN", "empty grid, nothing to do");
        return (grid, Statistics::default());
    }

    let mut grid = grid;
    let before = Shape::of(&grid);
    let mut deltas = Vec::with_capacity(Stage::ORDER.len());

    for stage in Stage::ORDER {
        if !stage.is_enabled(options) {
            continue;
        }
        let count = stage.apply(&mut grid, options);
        log::debug!(target: "CLEAN", "{}: {}", stage.name(), count);
        deltas.push(StageDelta { stage, count });
    }

    let stats = Statistics::fold(deltas, before, Shape::of(&grid));
    log::info!(
        target: "CLEAN",
        "cleaned {}x{} -> {}x{}, {} operations",
        stats.rows_before,
        stats.columns_before,
        stats.rows_after,
        stats.columns_after,
        stats.total_operations
    );
    (grid, stats)
}

/// Clean every grid in place (one per sheet) and return the summed statistics.
pub fn clean_sheets<'a>(
    grids: impl IntoIterator<Item = &'a mut Grid>,
    options: &CleaningOptions,
) -> Statistics {
    let mut total = Statistics::default();
    for grid in grids {
        let (cleaned, stats) = clean(std::mem::take(grid), options);
        *grid = cleaned;
        total.merge(&stats);
    }
    total
}
