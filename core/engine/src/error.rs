//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid cleaning options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
