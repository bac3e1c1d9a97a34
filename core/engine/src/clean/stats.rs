//! FILENAME: core/engine/src/clean/stats.rs
//! PURPOSE: Statistics record returned with every cleaned grid.
//! CONTEXT: Stages never touch this record. They hand back a `StageDelta`,
//! and `Statistics::fold` sums the deltas once the run is over. Shape fields
//! (rows/columns before and after) are informational and are not part of
//! `total_operations`. Neither are `missing_handled` and `rows_filtered`:
//! the total covers the eight core cleaning counters only.

use crate::clean::Stage;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// The count one stage reported for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDelta {
    pub stage: Stage,
    pub count: usize,
}

/// Row and column extent of a grid at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl Shape {
    pub fn of(grid: &Grid) -> Self {
        Shape {
            rows: grid.row_count(),
            columns: grid.column_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub duplicates_removed: usize,
    pub blanks_removed: usize,
    pub spaces_fixed: usize,
    pub types_converted: usize,
    pub dates_standardized: usize,
    pub case_fixed: usize,
    pub columns_normalized: usize,
    pub replacements_made: usize,
    pub total_operations: usize,

    pub missing_handled: usize,
    pub rows_filtered: usize,

    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
}

impl Statistics {
    /// Fold per-stage deltas into a finished record.
    pub fn fold(
        deltas: impl IntoIterator<Item = StageDelta>,
        before: Shape,
        after: Shape,
    ) -> Self {
        let mut stats = Statistics {
            rows_before: before.rows,
            rows_after: after.rows,
            columns_before: before.columns,
            columns_after: after.columns,
            ..Statistics::default()
        };

        for delta in deltas {
            let counter = match delta.stage {
                Stage::RemoveDuplicates => &mut stats.duplicates_removed,
                Stage::TrimSpaces => &mut stats.spaces_fixed,
                Stage::ConvertTypes => &mut stats.types_converted,
                Stage::StandardizeDates => &mut stats.dates_standardized,
                Stage::FixTextCase => &mut stats.case_fixed,
                Stage::RemoveBlanks => &mut stats.blanks_removed,
                Stage::HandleMissing => &mut stats.missing_handled,
                Stage::NormalizeColumnNames => &mut stats.columns_normalized,
                Stage::FindAndReplace => &mut stats.replacements_made,
                Stage::FilterRows => &mut stats.rows_filtered,
                // Sorting reorders rows; it has no counter.
                Stage::SortData => continue,
            };
            *counter += delta.count;
        }

        stats.total_operations = stats.counter_sum();
        stats
    }

    /// Add another run's figures (e.g. another sheet of the same workbook).
    pub fn merge(&mut self, other: &Statistics) {
        self.duplicates_removed += other.duplicates_removed;
        self.blanks_removed += other.blanks_removed;
        self.spaces_fixed += other.spaces_fixed;
        self.types_converted += other.types_converted;
        self.dates_standardized += other.dates_standardized;
        self.case_fixed += other.case_fixed;
        self.columns_normalized += other.columns_normalized;
        self.replacements_made += other.replacements_made;
        self.missing_handled += other.missing_handled;
        self.rows_filtered += other.rows_filtered;
        self.rows_before += other.rows_before;
        self.rows_after += other.rows_after;
        self.columns_before += other.columns_before;
        self.columns_after += other.columns_after;
        self.total_operations = self.counter_sum();
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn columns_removed(&self) -> usize {
        self.columns_before.saturating_sub(self.columns_after)
    }

    fn counter_sum(&self) -> usize {
        self.duplicates_removed
            + self.blanks_removed
            + self.spaces_fixed
            + self.types_converted
            + self.dates_standardized
            + self.case_fixed
            + self.columns_normalized
            + self.replacements_made
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(stage: Stage, count: usize) -> StageDelta {
        StageDelta { stage, count }
    }

    #[test]
    fn test_fold_sums_counters() {
        let stats = Statistics::fold(
            [
                delta(Stage::RemoveDuplicates, 2),
                delta(Stage::TrimSpaces, 3),
                delta(Stage::FindAndReplace, 1),
                delta(Stage::SortData, 99),
            ],
            Shape { rows: 10, columns: 4 },
            Shape { rows: 8, columns: 3 },
        );
        assert_eq!(stats.duplicates_removed, 2);
        assert_eq!(stats.spaces_fixed, 3);
        assert_eq!(stats.replacements_made, 1);
        assert_eq!(stats.total_operations, 6);
        assert_eq!(stats.rows_removed(), 2);
        assert_eq!(stats.columns_removed(), 1);
    }

    #[test]
    fn test_side_counters_stay_out_of_total() {
        let stats = Statistics::fold(
            [
                delta(Stage::HandleMissing, 4),
                delta(Stage::FilterRows, 2),
                delta(Stage::TrimSpaces, 1),
            ],
            Shape::default(),
            Shape::default(),
        );
        assert_eq!(stats.missing_handled, 4);
        assert_eq!(stats.rows_filtered, 2);
        assert_eq!(stats.total_operations, 1);

        let mut total = stats;
        total.merge(&stats);
        assert_eq!(total.missing_handled, 8);
        assert_eq!(total.rows_filtered, 4);
        assert_eq!(total.total_operations, 2);
    }

    #[test]
    fn test_merge() {
        let a = Statistics::fold([delta(Stage::ConvertTypes, 4)], Shape::default(), Shape::default());
        let b = Statistics::fold([delta(Stage::FixTextCase, 1)], Shape::default(), Shape::default());
        let mut total = a;
        total.merge(&b);
        assert_eq!(total.types_converted, 4);
        assert_eq!(total.case_fixed, 1);
        assert_eq!(total.total_operations, 5);
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = Statistics::fold([delta(Stage::RemoveBlanks, 1)], Shape::default(), Shape::default());
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["blanksRemoved"], 1);
        assert_eq!(json["totalOperations"], 1);
        assert_eq!(json["duplicatesRemoved"], 0);
    }
}
