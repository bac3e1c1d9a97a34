//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: Holds one sheet's worth of cells as positional rows.
//! CONTEXT: Row 0 is the header row, every later row is a data row. Rows
//! are dense `Vec`s and may be ragged; a missing trailing cell reads as blank.
//! Column names only exist through the header, so name lookups resolve to a
//! position once and everything after that is positional.

use crate::cell::CellValue;
use serde::{Deserialize, Serialize};

/// The Grid struct holds the rows of a single sheet.
/// Row and Col are 0-based indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Creates a new, empty Grid.
    pub fn new() -> Self {
        Grid { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Grid { rows }
    }

    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the header. Empty when there is no header either.
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn data_rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        self.rows.get_mut(1..).unwrap_or(&mut [])
    }

    /// Returns the header text at `col`, if that header cell is text.
    pub fn header_name(&self, col: usize) -> Option<&str> {
        self.header()?.get(col)?.as_text()
    }

    /// Position of the first header cell whose text equals `name` exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header()?
            .iter()
            .position(|cell| cell.as_text() == Some(name))
    }

    /// Per-position allow flags for a list of header names, sized to the
    /// widest row. An empty list means every column and yields None.
    pub fn column_mask(&self, names: &[String]) -> Option<Vec<bool>> {
        if names.is_empty() {
            return None;
        }
        Some(
            (0..self.column_count())
                .map(|col| {
                    self.header_name(col)
                        .is_some_and(|name| names.iter().any(|n| n == name))
                })
                .collect(),
        )
    }

    /// Sets a cell at the specified coordinates.
    /// Grows the grid (rows and the target row) with blanks as needed.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let target = &mut self.rows[row];
        if target.len() <= col {
            target.resize(col + 1, CellValue::Empty);
        }
        target[col] = value;
    }

    /// Retrieves a reference to a cell. Returns None outside the stored area.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)
    }
}
