//! FILENAME: core/engine/src/clean/case.rs
//! PURPOSE: Recase header text and data text independently.

use crate::cell::CellValue;
use crate::clean::options::CaseStyle;
use crate::grid::Grid;

/// Returns the number of text cells (header and data together) that changed.
/// `columns` limits recasing to those header names; empty means every column.
pub fn fix_text_case(
    grid: &mut Grid,
    header_case: &CaseStyle,
    text_case: &CaseStyle,
    columns: &[String],
) -> usize {
    let allowed = grid.column_mask(columns);
    let mut fixed = 0;
    for (row_idx, row) in grid.rows.iter_mut().enumerate() {
        let style = if row_idx == 0 { header_case } else { text_case };
        for (col, cell) in row.iter_mut().enumerate() {
            if let Some(flags) = &allowed {
                if !flags.get(col).copied().unwrap_or(false) {
                    continue;
                }
            }
            if let CellValue::Text(text) = cell {
                let recased = style.apply(text);
                if recased != *text {
                    *text = recased;
                    fixed += 1;
                }
            }
        }
    }
    fixed
}
