// src/sheets/sync.rs
//! Cached table loading and full-replace persistence.
//!
//! The remote sheet is the source of truth. `load` serves the cached copy until
//! it is invalidated, `save` overwrites the whole remote sheet and invalidates
//! the cache so the next `load` re-reads what was actually stored.
//!
//! There is no conflict detection: a session assumes it is the only writer, and
//! the last full-replace wins when two sessions edit the same sheet.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use bevy::log::{debug, info, warn};

use super::definitions::{default_header_row, StoreHandle, StoreSelector};
use super::error::{SheetError, SheetResult};
use super::remote::RemoteStore;
use super::resolver;
use super::sheet_table::Table;

/// Loaded tables keyed by `StoreHandle::key`.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<String, Table>,
}

impl TableCache {
    pub fn contains(&self, handle: &StoreHandle) -> bool {
        self.entries.contains_key(&handle.key)
    }

    /// Returns true when an entry was dropped.
    pub fn invalidate(&mut self, handle: &StoreHandle) -> bool {
        self.entries.remove(&handle.key).is_some()
    }
}

pub struct SyncEngine {
    store: Box<dyn RemoteStore>,
    cache: TableCache,
}

impl SyncEngine {
    pub fn new(store: Box<dyn RemoteStore>) -> Self {
        Self {
            store,
            cache: TableCache::default(),
        }
    }

    pub fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Returns the cached table, reading it from the store on a miss.
    pub fn load(&mut self, handle: &StoreHandle) -> SheetResult<&Table> {
        match self.cache.entries.entry(handle.key.clone()) {
            Entry::Occupied(entry) => {
                debug!("Serving '{}' from cache.", handle.title);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let raw = self.store.read_all(handle)?;
                let table = Table::from_raw_rows(&handle.title, raw)?;
                debug!(
                    "Loaded '{}' from {}: {} columns, {} rows.",
                    handle.title,
                    self.store.backend_name(),
                    table.columns().len(),
                    table.row_count()
                );
                Ok(entry.insert(table))
            }
        }
    }

    /// Overwrites the remote sheet with `table` (header and every row).
    ///
    /// On failure the cache is kept: it still holds the last table known to be
    /// consistent, and the next successful save rewrites the sheet from it.
    pub fn save(&mut self, handle: &StoreHandle, table: &Table) -> SheetResult<()> {
        let rows = table.to_raw_rows();
        if let Err(e) = self.store.replace_all(handle, &rows) {
            warn!("Saving '{}' failed, cache kept: {}", handle.title, e);
            return Err(e);
        }
        self.cache.invalidate(handle);
        info!(
            "Saved '{}' ({} rows) to {}.",
            handle.title,
            table.row_count(),
            self.store.backend_name()
        );
        Ok(())
    }

    pub fn invalidate(&mut self, handle: &StoreHandle) {
        if self.cache.invalidate(handle) {
            debug!("Invalidated cache for '{}'.", handle.title);
        }
    }

    /// Drops the cache entry and reads the sheet again.
    pub fn refresh(&mut self, handle: &StoreHandle) -> SheetResult<&Table> {
        self.invalidate(handle);
        self.load(handle)
    }
}

/// One open sheet: the handle resolved at startup plus its sync engine.
///
/// Built once per process and passed to whoever needs it; the handle never
/// changes for the lifetime of the session.
pub struct SheetSession {
    handle: StoreHandle,
    engine: SyncEngine,
}

impl SheetSession {
    pub fn open(store: Box<dyn RemoteStore>, selector: &StoreSelector) -> SheetResult<Self> {
        let handle = resolver::resolve(store.as_ref(), selector)?;
        Ok(Self {
            handle,
            engine: SyncEngine::new(store),
        })
    }

    pub fn handle(&self) -> &StoreHandle {
        &self.handle
    }

    pub fn backend_name(&self) -> &'static str {
        self.engine.store().backend_name()
    }

    pub fn is_cached(&self) -> bool {
        self.engine.cache().contains(&self.handle)
    }

    pub fn load(&mut self) -> SheetResult<&Table> {
        self.engine.load(&self.handle)
    }

    pub fn refresh(&mut self) -> SheetResult<&Table> {
        self.engine.refresh(&self.handle)
    }

    pub fn save(&mut self, table: &Table) -> SheetResult<()> {
        self.engine.save(&self.handle, table)
    }

    /// Appends `values` as the last row and saves.
    pub fn add_row(&mut self, values: Vec<String>) -> SheetResult<()> {
        let mut next = self.engine.load(&self.handle)?.clone();
        next.append_row(values)?;
        self.engine.save(&self.handle, &next)
    }

    /// Replaces one cell of the current table and saves.
    pub fn update_cell(&mut self, row_index: usize, column: &str, value: String) -> SheetResult<()> {
        let mut next = self.engine.load(&self.handle)?.clone();
        next.update_cell(row_index, column, value)?;
        self.engine.save(&self.handle, &next)
    }

    /// Writes the default header into a sheet that has no rows at all.
    pub fn initialize_header(&mut self) -> SheetResult<()> {
        let raw = self.engine.store().read_all(&self.handle)?;
        if !raw.is_empty() {
            return Err(SheetError::Schema(format!(
                "sheet '{}' already has {} rows; refusing to write a header",
                self.handle.title,
                raw.len()
            )));
        }
        let table = Table::new(default_header_row())?;
        self.engine.save(&self.handle, &table)
    }
}
