// src/sheets/definitions.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header written into a freshly provisioned sheet.
pub const DEFAULT_HEADERS: [&str; 3] = ["Name", "Age", "City"];

/// Sheet title used when neither settings nor flags name one.
pub const DEFAULT_SHEET_NAME: &str = "SheetBridge";

pub fn default_header_row() -> Vec<String> {
    DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// How the session picks its backing sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum StoreSelector {
    /// Look the sheet up by its title, creating it when missing.
    Name(String),
    /// Open the sheet by its stable key. Never creates.
    Key(String),
}

impl Default for StoreSelector {
    fn default() -> Self {
        StoreSelector::Name(DEFAULT_SHEET_NAME.to_string())
    }
}

impl fmt::Display for StoreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreSelector::Name(name) => write!(f, "name '{}'", name),
            StoreSelector::Key(key) => write!(f, "key '{}'", key),
        }
    }
}

/// Session-scoped reference to one remote sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHandle {
    /// Stable key assigned by the store (spreadsheet id, row id in SQLite, ...).
    pub key: String,
    pub title: String,
    pub url: String,
    /// Tab inside the spreadsheet that holds the table. Always the first one.
    pub worksheet: String,
}
