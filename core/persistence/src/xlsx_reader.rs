//! FILENAME: core/persistence/src/xlsx_reader.rs
//! PURPOSE: Decode a spreadsheet into one Grid per sheet.
//! CONTEXT: The format is sniffed from the bytes, not the file name, so
//! legacy .xls uploads (and xlsb/ods) decode the same way XLSX does. Cells keep their absolute sheet position (A1 is row 0, column 0),
//! so a header written in row 1 is always grid row 0. Trailing empty cells
//! and trailing empty rows are dropped, which makes decode -> encode -> decode
//! stable: the writer skips blanks and the reader never reintroduces them.

use crate::{PersistenceError, Sheet, Workbook};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use engine::cell::CellValue;
use engine::grid::Grid;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Decode an in-memory workbook (e.g. an upload body).
pub fn read_xlsx(bytes: &[u8]) -> Result<Workbook, PersistenceError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    read_sheets(workbook)
}

/// Read and decode a workbook file. The extension is not consulted.
pub fn load_xlsx(path: &Path) -> Result<Workbook, PersistenceError> {
    let bytes = std::fs::read(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(target: "XLSX", "read {} bytes from {}", bytes.len(), path.display());
    read_xlsx(&bytes)
}

fn read_sheets<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Workbook, PersistenceError> {
    let sheet_names = workbook.sheet_names();

    if sheet_names.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name)?;
        let grid = range_to_grid(&range);
        log::debug!(
            target: "XLSX",
            "read sheet {:?}: {} rows x {} columns",
            sheet_name,
            grid.row_count(),
            grid.column_count()
        );
        sheets.push(Sheet::new(sheet_name.clone(), grid));
    }

    Ok(Workbook { sheets })
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::new();
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for source_row in range.rows() {
        let mut row = vec![CellValue::Empty; start_col as usize];
        row.extend(source_row.iter().map(data_to_cell));
        while row.last() == Some(&CellValue::Empty) {
            row.pop();
        }
        rows.push(row);
    }
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    Grid::from_rows(rows)
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
