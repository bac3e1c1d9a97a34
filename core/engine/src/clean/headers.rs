//! FILENAME: core/engine/src/clean/headers.rs
//! PURPOSE: Normalize header names to lowercase snake-ish identifiers.
//! CONTEXT: lowercase, trim, whitespace runs -> '_', then drop anything outside
//! [a-z0-9_]. Applying it twice gives the same header as applying it once.

use crate::cell::CellValue;
use crate::grid::Grid;

/// Returns the number of header cells that changed. Data rows are untouched.
pub fn normalize_column_names(grid: &mut Grid) -> usize {
    let Some(header) = grid.rows.first_mut() else {
        return 0;
    };

    let mut normalized_count = 0;
    for cell in header.iter_mut() {
        if let CellValue::Text(name) = cell {
            let normalized = normalize_name(name);
            if normalized != *name {
                *name = normalized;
                normalized_count += 1;
            }
        }
    }
    normalized_count
}

pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}
