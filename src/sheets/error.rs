// src/sheets/error.rs

use thiserror::Error;

/// Errors surfaced by the resolver, the sync engine and the remote store adapters.
///
/// Every variant is shown to the user as-is; nothing in the core retries.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Access denied by the remote store: {0}")]
    Access(String),
    #[error("Sheet not found: {0}")]
    NotFound(String),
    #[error("Sheet layout error: {0}")]
    Schema(String),
    #[error("Row has {actual} values but the sheet has {expected} columns.")]
    Validation { expected: usize, actual: usize },
    #[error("Row index {index} out of bounds ({row_count} rows).")]
    RowIndex { index: usize, row_count: usize },
    #[error("Unknown column '{0}'.")]
    Column(String),
    #[error("Remote store error: {0}")]
    Remote(String),
    #[error("Local store error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SheetResult<T> = Result<T, SheetError>;

impl From<reqwest::Error> for SheetError {
    fn from(e: reqwest::Error) -> Self {
        SheetError::Remote(e.to_string())
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(e: serde_json::Error) -> Self {
        SheetError::Remote(format!("malformed payload: {}", e))
    }
}
