//! FILENAME: core/engine/src/clean/missing.rs
//! PURPOSE: Deal with blank data cells: fill them, average them, or drop rows.
//! CONTEXT: Runs on data rows only; the header is never filled. Positions
//! past the end of a short row count as blank, so filling squares the grid
//! off to its widest row.

use crate::cell::CellValue;
use crate::clean::options::MissingStrategy;
use crate::coerce::parse_number;
use crate::grid::Grid;

/// Returns cells filled (Fill, Average) or rows dropped (Remove).
pub fn handle_missing(grid: &mut Grid, strategy: MissingStrategy, fill_value: &str) -> usize {
    if grid.row_count() <= 1 {
        return 0;
    }
    match strategy {
        MissingStrategy::Fill => {
            if fill_value.is_empty() {
                return 0;
            }
            let width = grid.column_count();
            fill(grid, |_| Some(CellValue::text(fill_value)), width)
        }
        MissingStrategy::Average => {
            let width = grid.column_count();
            let means: Vec<Option<f64>> = (0..width).map(|col| column_mean(grid, col)).collect();
            fill(grid, |col| means[col].map(CellValue::Number), width)
        }
        MissingStrategy::Remove => {
            let header = grid.rows.remove(0);
            let before = grid.rows.len();
            grid.rows.retain(|row| !row.iter().all(CellValue::is_blank));
            let removed = before - grid.rows.len();
            grid.rows.insert(0, header);
            removed
        }
    }
}

fn fill(grid: &mut Grid, value_for: impl Fn(usize) -> Option<CellValue>, width: usize) -> usize {
    let mut filled = 0;
    for row in grid.data_rows_mut() {
        for col in 0..width {
            if !row.get(col).map_or(true, CellValue::is_blank) {
                continue;
            }
            let Some(value) = value_for(col) else {
                continue;
            };
            if row.len() <= col {
                row.resize(col + 1, CellValue::Empty);
            }
            row[col] = value;
            filled += 1;
        }
    }
    filled
}

/// Mean of the numeric data cells in a column, counting text that reads as a
/// number. None when the column has no numbers.
fn column_mean(grid: &Grid, col: usize) -> Option<f64> {
    let values: Vec<f64> = grid
        .data_rows()
        .iter()
        .filter_map(|row| match row.get(col)? {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(text) => parse_number(text.trim()),
            _ => None,
        })
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec!["Name".into(), "Score".into(), "Note".into()],
            vec!["Ann".into(), CellValue::Number(4.0), CellValue::Empty],
            vec![CellValue::Empty, CellValue::text(""), CellValue::Empty],
            vec!["Cy".into(), "8".into()],
        ])
    }

    #[test]
    fn test_fill_writes_value_into_blanks_and_gaps() {
        let mut grid = sample();
        // Row 1: Note. Row 2: all three. Row 3: the missing Note position.
        assert_eq!(handle_missing(&mut grid, MissingStrategy::Fill, "N/A"), 5);
        assert_eq!(grid.rows[2], vec![CellValue::text("N/A"); 3]);
        assert_eq!(grid.rows[3][2], CellValue::text("N/A"));
        assert_eq!(grid.rows[0][0], CellValue::text("Name"));
    }

    #[test]
    fn test_empty_fill_value_changes_nothing() {
        let mut grid = sample();
        assert_eq!(handle_missing(&mut grid, MissingStrategy::Fill, ""), 0);
        assert_eq!(grid, sample());
    }

    #[test]
    fn test_average_uses_numeric_cells_only() {
        let mut grid = sample();
        // Score mean is (4 + 8) / 2; Name and Note have no numbers.
        assert_eq!(handle_missing(&mut grid, MissingStrategy::Average, "N/A"), 1);
        assert_eq!(grid.rows[2][1], CellValue::Number(6.0));
        assert_eq!(grid.rows[2][0], CellValue::Empty);
    }

    #[test]
    fn test_remove_drops_rows_without_values() {
        let mut grid = sample();
        assert_eq!(handle_missing(&mut grid, MissingStrategy::Remove, "N/A"), 1);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[2][0], CellValue::text("Cy"));
    }

    #[test]
    fn test_header_only_is_untouched() {
        let mut grid = Grid::from_rows(vec![vec!["A".into(), CellValue::Empty]]);
        assert_eq!(handle_missing(&mut grid, MissingStrategy::Fill, "N/A"), 0);
        assert_eq!(grid.rows[0][1], CellValue::Empty);
    }
}
