//! FILENAME: core/engine/src/clean/sort.rs
//! PURPOSE: Stable sort of data rows by one column.
//! CONTEXT: Two numbers compare numerically, so -0.0 and 0.0 tie; any other
//! pair compares by lowercased display text. Over a mixed column that
//! relation is not a total order, so rows go through a merge sort that only
//! ever asks "is b strictly before a" and cannot panic on an inconsistent
//! comparator.

use crate::cell::CellValue;
use crate::clean::options::{SortColumn, SortOrder};
use crate::grid::Grid;
use std::cmp::Ordering;

/// Resolve the sort column to a position. Unknown names fall back to 0.
pub fn resolve_sort_column(grid: &Grid, column: &SortColumn) -> usize {
    match column {
        SortColumn::Index(index) => *index,
        SortColumn::Name(name) => grid.column_index(name).unwrap_or(0),
    }
}

/// Reorders data rows in place. The header stays at row 0.
pub fn sort_data(grid: &mut Grid, column: &SortColumn, order: SortOrder) {
    if grid.data_rows().len() < 2 {
        return;
    }
    let col = resolve_sort_column(grid, column);

    let data = grid.rows.split_off(1);
    let sorted = stable_sort_by(data, |a, b| {
        let ordering = compare_cells(cell_at(a, col), cell_at(b, col));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    grid.rows.extend(sorted);
}

pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        _ => a
            .display_value()
            .to_lowercase()
            .cmp(&b.display_value().to_lowercase()),
    }
}

static EMPTY: CellValue = CellValue::Empty;

fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY)
}

fn stable_sort_by<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn merge_sort<T, F: FnMut(&T, &T) -> Ordering>(mut items: Vec<T>, cmp: &mut F) -> Vec<T> {
        if items.len() < 2 {
            return items;
        }
        let right = items.split_off(items.len() / 2);
        let left = merge_sort(items, cmp);
        let right = merge_sort(right, cmp);

        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut l = left.into_iter().peekable();
        let mut r = right.into_iter().peekable();
        loop {
            // Left wins ties, which keeps the sort stable.
            let take_right = match (l.peek(), r.peek()) {
                (Some(a), Some(b)) => cmp(b, a) == Ordering::Less,
                _ => break,
            };
            merged.extend(if take_right { r.next() } else { l.next() });
        }
        merged.extend(l);
        merged.extend(r);
        merged
    }

    merge_sort(items, &mut cmp)
}
