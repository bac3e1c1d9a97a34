//! FILENAME: core/engine/src/clean/trim.rs
//! PURPOSE: Strip and collapse whitespace in every text cell, header included.

use crate::cell::CellValue;
use crate::grid::Grid;

/// Returns the number of cells whose text changed.
pub fn trim_spaces(grid: &mut Grid) -> usize {
    let mut fixed = 0;
    for cell in grid.rows.iter_mut().flatten() {
        if let CellValue::Text(text) = cell {
            let collapsed = collapse_whitespace(text);
            if collapsed != *text {
                *text = collapsed;
                fixed += 1;
            }
        }
    }
    fixed
}

/// Trim both ends and turn every internal whitespace run into one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
