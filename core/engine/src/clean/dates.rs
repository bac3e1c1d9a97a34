//! FILENAME: core/engine/src/clean/dates.rs
//! PURPOSE: Rewrite recognizable dates in data rows into one target format.
//! CONTEXT: Only non-blank text cells are parsed (see `date::parse_date`).
//! Numeric cells are read as day serials only when the caller opts in.
//! Anything that does not parse is left exactly as it was and not counted.

use crate::cell::CellValue;
use crate::date::{parse_date, serial_to_datetime, DateFormat};
use crate::grid::Grid;

/// Returns the number of cells rewritten.
pub fn standardize_dates(
    grid: &mut Grid,
    format: &DateFormat,
    date_columns: &[String],
    serials: bool,
) -> usize {
    if grid.row_count() <= 1 {
        return 0;
    }

    let allowed = grid.column_mask(date_columns);

    let mut standardized = 0;
    for row in grid.data_rows_mut() {
        for (col, cell) in row.iter_mut().enumerate() {
            if let Some(flags) = &allowed {
                if !flags.get(col).copied().unwrap_or(false) {
                    continue;
                }
            }

            let parsed = match cell {
                CellValue::Text(text) if !text.trim().is_empty() => parse_date(text),
                CellValue::Number(serial) if serials => serial_to_datetime(*serial),
                _ => None,
            };

            if let Some(formatted) = parsed.and_then(|value| format.format(&value)) {
                *cell = CellValue::Text(formatted);
                standardized += 1;
            }
        }
    }

    standardized
}
