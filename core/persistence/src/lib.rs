//! FILENAME: core/persistence/src/lib.rs
//! Sheet-clean Persistence Module
//!
//! Decodes uploaded XLSX bytes into grids and encodes cleaned grids back.
//! Only cell values travel; styles, formulas and sheet metadata are dropped.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use xlsx_reader::{load_xlsx, read_xlsx};
pub use xlsx_writer::{save_xlsx, write_xlsx};

use engine::grid::Grid;

// ============================================================================
// WORKBOOK
// ============================================================================

/// An ordered set of named sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// A single-sheet workbook.
    pub fn from_grid(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            sheets: vec![Sheet::new(name, grid)],
        }
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet, PersistenceError> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| PersistenceError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    /// Every sheet's grid, in sheet order. Feeds `engine::clean_sheets`.
    pub fn grids_mut(&mut self) -> impl Iterator<Item = &mut Grid> {
        self.sheets.iter_mut().map(|sheet| &mut sheet.grid)
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// Represents a single worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::cell::CellValue;

    #[test]
    fn test_sheet_lookup() {
        let workbook = Workbook {
            sheets: vec![
                Sheet::new("Data", Grid::new()),
                Sheet::new("Notes", Grid::from_rows(vec![vec![CellValue::text("x")]])),
            ],
        };
        assert_eq!(workbook.sheet_names(), ["Data", "Notes"]);
        assert_eq!(workbook.sheet("Notes").unwrap().grid.row_count(), 1);
        assert!(matches!(
            workbook.sheet("Missing"),
            Err(PersistenceError::SheetNotFound(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_grids_mut_visits_every_sheet() {
        let mut workbook = Workbook {
            sheets: vec![Sheet::new("A", Grid::new()), Sheet::new("B", Grid::new())],
        };
        for grid in workbook.grids_mut() {
            grid.set_cell(0, 0, CellValue::text("h"));
        }
        assert!(workbook.sheets.iter().all(|s| s.grid.row_count() == 1));
    }
}
