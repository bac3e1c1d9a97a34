//! FILENAME: core/engine/src/clean/dedup.rs
//! PURPOSE: Drop data rows whose key was already seen.
//! CONTEXT: The key is the pipe-joined display values of the named key
//! columns (an unknown column contributes an empty slot), or of the whole
//! row when no key columns are given. First occurrence wins and row order is
//! kept. The header row is never a candidate.

use crate::cell::CellValue;
use crate::grid::Grid;
use std::collections::HashSet;

/// Returns the number of rows dropped.
pub fn remove_duplicates(grid: &mut Grid, key_columns: &[String]) -> usize {
    if grid.row_count() <= 1 {
        return 0;
    }

    // Resolved once against the current header.
    let key_indices: Vec<Option<usize>> = key_columns
        .iter()
        .map(|name| grid.column_index(name))
        .collect();

    let mut rows = std::mem::take(&mut grid.rows).into_iter();
    let mut kept = Vec::with_capacity(rows.len());
    kept.extend(rows.next());

    let mut seen = HashSet::new();
    let mut removed = 0;
    for row in rows {
        let key = if key_indices.is_empty() {
            join_key(row.iter().map(CellValue::display_value))
        } else {
            join_key(key_indices.iter().map(|idx| {
                idx.and_then(|i| row.get(i))
                    .map(CellValue::display_value)
                    .unwrap_or_default()
            }))
        };

        if seen.insert(key) {
            kept.push(row);
        } else {
            removed += 1;
        }
    }

    grid.rows = kept;
    removed
}

fn join_key(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("|")
}
