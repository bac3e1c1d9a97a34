//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for sheet-clean integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use engine::{CellValue, Grid};
use persistence::{load_xlsx, save_xlsx, Sheet, Workbook};
use sheet_clean::CleanArgs;
use tempfile::TempDir;

/// A scratch directory holding input and output workbooks for one test.
pub struct TestHarness {
    pub dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a workbook with the given sheets and return its path.
    pub fn write_workbook(&self, name: &str, sheets: Vec<(&str, Grid)>) -> PathBuf {
        let path = self.path(name);
        let workbook = Workbook {
            sheets: sheets
                .into_iter()
                .map(|(sheet_name, grid)| Sheet::new(sheet_name, grid))
                .collect(),
        };
        save_xlsx(&workbook, &path).expect("write fixture workbook");
        path
    }

    /// Write the messy-contacts fixture as a single-sheet workbook.
    pub fn with_contacts(&self, name: &str) -> PathBuf {
        self.write_workbook(name, vec![("Contacts", ContactsFixture::grid())])
    }

    pub fn read_workbook(&self, path: &Path) -> Workbook {
        load_xlsx(path).expect("read output workbook")
    }

    pub fn clean_args(&self, input: &Path, options_json: &str) -> CleanArgs {
        CleanArgs {
            options_json: Some(options_json.to_string()),
            ..CleanArgs::new(input)
        }
    }
}

/// A small contact list with the usual problems: padding, duplicates,
/// mixed date styles, placeholder values and an empty second column.
pub struct ContactsFixture;

impl ContactsFixture {
    pub fn headers() -> Vec<&'static str> {
        vec![" Full  Name", "", "Email", "Signed Up", "Active"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
        vec![
            ("  carol  king ", "carol@example.com", "03/05/2024", "TRUE"),
            ("  carol  king ", "carol@example.com", "03/05/2024", "TRUE"),
            ("ALAN turing", "alan@example.com", "2023-11-20", "false"),
            ("", "", "", ""),
            ("bob", "N/A", "Mar 09, 2022", "true"),
        ]
    }

    pub fn grid() -> Grid {
        let mut rows = vec![Self::headers()
            .into_iter()
            .map(CellValue::from)
            .collect::<Vec<_>>()];
        for (name, email, signed_up, active) in Self::data() {
            rows.push(vec![
                CellValue::from(name),
                CellValue::Empty,
                CellValue::from(email),
                CellValue::from(signed_up),
                CellValue::from(active),
            ]);
        }
        Grid::from_rows(rows)
    }
}
