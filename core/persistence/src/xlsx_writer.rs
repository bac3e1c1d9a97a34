//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, Workbook};
use engine::cell::CellValue;
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Encode to XLSX bytes (e.g. a download body).
pub fn write_xlsx(workbook: &Workbook) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build(workbook)?;
    Ok(xlsx.save_to_buffer()?)
}

pub fn save_xlsx(workbook: &Workbook, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = build(workbook)?;
    xlsx.save(path)?;
    Ok(())
}

fn build(workbook: &Workbook) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        let mut written = 0usize;
        for (row_idx, row) in sheet.grid.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_blank() {
                    continue;
                }
                let row = u32::try_from(row_idx).map_err(|_| {
                    PersistenceError::InvalidFormat(format!("Row {} out of range", row_idx))
                })?;
                let col = u16::try_from(col_idx).map_err(|_| {
                    PersistenceError::InvalidFormat(format!("Column {} out of range", col_idx))
                })?;
                write_cell(worksheet, row, col, cell)?;
                written += 1;
            }
        }

        log::debug!(target: "XLSX", "wrote sheet {:?}: {} cells", sheet.name, written);
    }

    Ok(xlsx)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), PersistenceError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
