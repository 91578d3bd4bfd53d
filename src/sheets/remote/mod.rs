// src/sheets/remote/mod.rs
//! Adapters for the stores a sheet can live in.
//!
//! The sync engine only talks to [`RemoteStore`]; every adapter treats cells
//! as plain strings and leaves type coercion to the caller.

pub mod google;
pub mod memory;
pub mod sqlite;

use std::path::PathBuf;

use bevy::log::info;

use super::definitions::StoreHandle;
use super::error::SheetResult;
use crate::credentials;
use crate::settings::{AppSettings, BackendKind};

pub use google::GoogleSheetsStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Raw value matrix: header first, then data rows, possibly ragged.
pub type RawRows = Vec<Vec<String>>;

pub trait RemoteStore: Send + Sync {
    /// Short label for logs and the info panel.
    fn backend_name(&self) -> &'static str;

    fn find_by_name(&self, name: &str) -> SheetResult<Option<StoreHandle>>;

    fn open_by_key(&self, key: &str) -> SheetResult<Option<StoreHandle>>;

    /// Creates an empty sheet titled `name`.
    fn create(&self, name: &str) -> SheetResult<StoreHandle>;

    /// Appends one row after the last non-empty row.
    fn append_row(&self, handle: &StoreHandle, row: &[String]) -> SheetResult<()>;

    fn read_all(&self, handle: &StoreHandle) -> SheetResult<RawRows>;

    /// Clears the sheet and writes `rows` starting at the top-left cell.
    fn replace_all(&self, handle: &StoreHandle, rows: &[Vec<String>]) -> SheetResult<()>;
}

/// Builds the store selected in `settings`.
pub fn connect(settings: &AppSettings) -> SheetResult<Box<dyn RemoteStore>> {
    let store: Box<dyn RemoteStore> = match settings.backend {
        BackendKind::Google => {
            let token = credentials::resolve_access_token()?;
            Box::new(GoogleSheetsStore::new(token)?)
        }
        BackendKind::Sqlite => {
            let path = match &settings.sqlite_path {
                Some(path) => path.clone(),
                None => default_sqlite_path()?,
            };
            Box::new(SqliteStore::open(&path)?)
        }
        BackendKind::Memory => Box::new(MemoryStore::new()),
    };
    info!("Connected to '{}' store.", store.backend_name());
    Ok(store)
}

fn default_sqlite_path() -> SheetResult<PathBuf> {
    crate::settings::io::data_file_path("sheets.db")
        .map_err(|e| crate::sheets::error::SheetError::Config(e.to_string()))
}
