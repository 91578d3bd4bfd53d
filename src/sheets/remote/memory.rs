// src/sheets/remote/memory.rs
//! Process-local store. Nothing survives the process; used by tests and the
//! `memory` backend for trying the editor without an account.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{RawRows, RemoteStore};
use crate::sheets::definitions::StoreHandle;
use crate::sheets::error::{SheetError, SheetResult};

#[derive(Debug, Default)]
struct MemorySheet {
    title: String,
    rows: RawRows,
}

#[derive(Debug, Default)]
struct Counters {
    creates: AtomicUsize,
    appends: AtomicUsize,
    reads: AtomicUsize,
    replaces: AtomicUsize,
}

/// Cloning shares the underlying sheets, which lets a test keep a probe on the
/// store after handing a boxed copy to the session.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sheets: Arc<Mutex<BTreeMap<String, MemorySheet>>>,
    counters: Arc<Counters>,
    deny_access: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `SheetError::Access`.
    pub fn set_deny_access(&self, deny: bool) {
        self.deny_access.store(deny, Ordering::SeqCst);
    }

    /// Makes `replace_all` fail after clearing, like a write interrupted mid-way.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn create_count(&self) -> usize {
        self.counters.creates.load(Ordering::SeqCst)
    }

    pub fn append_count(&self) -> usize {
        self.counters.appends.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.counters.reads.load(Ordering::SeqCst)
    }

    pub fn replace_count(&self) -> usize {
        self.counters.replaces.load(Ordering::SeqCst)
    }

    /// Direct access to a sheet's rows, bypassing the counters.
    pub fn raw_rows(&self, key: &str) -> Option<RawRows> {
        self.lock().ok()?.get(key).map(|s| s.rows.clone())
    }

    /// Overwrites a sheet's rows as if someone edited it out-of-band.
    pub fn set_raw_rows(&self, key: &str, rows: RawRows) -> SheetResult<()> {
        let mut sheets = self.lock()?;
        let sheet = sheets
            .get_mut(key)
            .ok_or_else(|| SheetError::NotFound(key.to_string()))?;
        sheet.rows = rows;
        Ok(())
    }

    fn lock(&self) -> SheetResult<MutexGuard<'_, BTreeMap<String, MemorySheet>>> {
        self.sheets
            .lock()
            .map_err(|_| SheetError::Remote("memory store lock poisoned".to_string()))
    }

    fn check_access(&self) -> SheetResult<()> {
        if self.deny_access.load(Ordering::SeqCst) {
            return Err(SheetError::Access("memory store is locked".to_string()));
        }
        Ok(())
    }

    fn handle_for(key: &str, sheet: &MemorySheet) -> StoreHandle {
        StoreHandle {
            key: key.to_string(),
            title: sheet.title.clone(),
            url: format!("memory://{}", key),
            worksheet: "Sheet1".to_string(),
        }
    }
}

impl RemoteStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn find_by_name(&self, name: &str) -> SheetResult<Option<StoreHandle>> {
        self.check_access()?;
        let sheets = self.lock()?;
        Ok(sheets
            .iter()
            .find(|(_, sheet)| sheet.title == name)
            .map(|(key, sheet)| Self::handle_for(key, sheet)))
    }

    fn open_by_key(&self, key: &str) -> SheetResult<Option<StoreHandle>> {
        self.check_access()?;
        let sheets = self.lock()?;
        Ok(sheets.get(key).map(|sheet| Self::handle_for(key, sheet)))
    }

    fn create(&self, name: &str) -> SheetResult<StoreHandle> {
        self.check_access()?;
        let mut sheets = self.lock()?;
        let key = format!("mem-{}", self.counters.creates.fetch_add(1, Ordering::SeqCst) + 1);
        let sheet = MemorySheet {
            title: name.to_string(),
            rows: Vec::new(),
        };
        let handle = Self::handle_for(&key, &sheet);
        sheets.insert(key, sheet);
        Ok(handle)
    }

    fn append_row(&self, handle: &StoreHandle, row: &[String]) -> SheetResult<()> {
        self.check_access()?;
        let mut sheets = self.lock()?;
        let sheet = sheets
            .get_mut(&handle.key)
            .ok_or_else(|| SheetError::NotFound(handle.title.clone()))?;
        self.counters.appends.fetch_add(1, Ordering::SeqCst);
        sheet.rows.push(row.to_vec());
        Ok(())
    }

    fn read_all(&self, handle: &StoreHandle) -> SheetResult<RawRows> {
        self.check_access()?;
        let sheets = self.lock()?;
        let sheet = sheets
            .get(&handle.key)
            .ok_or_else(|| SheetError::NotFound(handle.title.clone()))?;
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        Ok(sheet.rows.clone())
    }

    fn replace_all(&self, handle: &StoreHandle, rows: &[Vec<String>]) -> SheetResult<()> {
        self.check_access()?;
        let mut sheets = self.lock()?;
        let sheet = sheets
            .get_mut(&handle.key)
            .ok_or_else(|| SheetError::NotFound(handle.title.clone()))?;
        self.counters.replaces.fetch_add(1, Ordering::SeqCst);
        sheet.rows.clear();
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SheetError::Remote("write interrupted".to_string()));
        }
        sheet.rows = rows.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_sheets() {
        let store = MemoryStore::new();
        let probe = store.clone();
        let handle = store.create("Shared").unwrap();
        assert_eq!(probe.find_by_name("Shared").unwrap(), Some(handle));
        assert_eq!(probe.create_count(), 1);
    }

    #[test]
    fn test_failed_write_leaves_sheet_cleared() {
        let store = MemoryStore::new();
        let handle = store.create("Flaky").unwrap();
        store.append_row(&handle, &["Name".to_string()]).unwrap();
        store.set_fail_writes(true);

        assert!(store.replace_all(&handle, &[vec!["Name".to_string()]]).is_err());
        assert_eq!(store.raw_rows(&handle.key), Some(vec![]));
    }

    #[test]
    fn test_denied_access() {
        let store = MemoryStore::new();
        store.set_deny_access(true);
        assert!(matches!(store.find_by_name("x"), Err(SheetError::Access(_))));
    }
}
