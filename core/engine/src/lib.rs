//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the cleaning engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod clean;
pub mod coerce;
pub mod date;
pub mod error;
pub mod grid;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use clean::{
    clean, clean_sheets, CaseStyle, CleaningOptions, FilterCondition, MissingStrategy,
    Replacement, SortColumn, SortOrder, Stage, Statistics,
};
pub use coerce::{coerce, parse_number};
pub use date::{parse_date, serial_to_datetime, DateFormat};
pub use error::EngineError;
pub use grid::Grid;
