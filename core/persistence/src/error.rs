//! FILENAME: core/persistence/src/error.rs
//! PURPOSE: Failures between a file on disk and a `Workbook`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The input file could not be read at all.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot encode workbook: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The bytes are not a spreadsheet calamine recognizes (xlsx, xls, xlsb, ods).
    #[error("Cannot decode workbook: {0}")]
    Decode(#[from] calamine::Error),

    #[error("Invalid workbook: {0}")]
    InvalidFormat(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
}
