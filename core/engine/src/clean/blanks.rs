//! FILENAME: core/engine/src/clean/blanks.rs
//! PURPOSE: Prune all-blank rows, then all-blank columns.
//! CONTEXT: Rows go first; columns are judged on what is left (header
//! included) and removed by position from every row, so header and data stay
//! aligned. A short row simply has nothing to remove at that position.

use crate::cell::CellValue;
use crate::grid::Grid;

/// Returns rows removed plus columns removed.
pub fn remove_blank_rows_and_columns(grid: &mut Grid) -> usize {
    let rows_before = grid.rows.len();
    grid.rows.retain(|row| !row.iter().all(CellValue::is_blank));
    let mut removed = rows_before - grid.rows.len();

    if grid.rows.is_empty() {
        return removed;
    }

    let width = grid.column_count();
    let keep: Vec<bool> = (0..width)
        .map(|col| {
            !grid
                .rows
                .iter()
                .all(|row| row.get(col).map_or(true, CellValue::is_blank))
        })
        .collect();

    let dropped = keep.iter().filter(|&&k| !k).count();
    if dropped == 0 {
        return removed;
    }
    removed += dropped;

    for row in &mut grid.rows {
        let mut col = 0;
        row.retain(|_| {
            let kept = keep[col];
            col += 1;
            kept
        });
    }

    removed
}
