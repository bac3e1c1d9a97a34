//! FILENAME: core/engine/src/clean/convert.rs
//! PURPOSE: Apply cell coercion to every data-row cell. The header is never converted.

use crate::coerce::coerce;
use crate::grid::Grid;

/// Returns the number of cells that changed type.
pub fn convert_types(grid: &mut Grid) -> usize {
    let mut converted = 0;
    for cell in grid.data_rows_mut().iter_mut().flatten() {
        if let Some(value) = coerce(cell) {
            *cell = value;
            converted += 1;
        }
    }
    converted
}
