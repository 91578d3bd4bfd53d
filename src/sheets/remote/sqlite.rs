// src/sheets/remote/sqlite.rs
//! Local single-file store. Each sheet is a row in `sheets`; its cells live in
//! `sheet_rows` as one JSON array per row.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use bevy::log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{RawRows, RemoteStore};
use crate::sheets::definitions::StoreHandle;
use crate::sheets::error::{SheetError, SheetResult};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sheets (
        key TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS sheets_title ON sheets(title);
    CREATE TABLE IF NOT EXISTS sheet_rows (
        sheet_key TEXT NOT NULL REFERENCES sheets(key) ON DELETE CASCADE,
        row_index INTEGER NOT NULL,
        cells TEXT NOT NULL,
        PRIMARY KEY (sheet_key, row_index)
    );";

pub struct SqliteStore {
    conn: Mutex<Connection>,
    location: String,
}

impl SqliteStore {
    pub fn open(path: &Path) -> SheetResult<Self> {
        let conn = Connection::open(path)?;
        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        debug!("SQLite store {:?} journal mode: {}", path, journal_mode);
        Self::init(conn, path.display().to_string())
    }

    pub fn open_in_memory() -> SheetResult<Self> {
        Self::init(Connection::open_in_memory()?, ":memory:".to_string())
    }

    fn init(conn: Connection, location: String) -> SheetResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        info!("SQLite store ready at {}", location);
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    fn lock(&self) -> SheetResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SheetError::Remote("SQLite connection lock poisoned".to_string()))
    }

    fn handle_for(&self, key: String, title: String) -> StoreHandle {
        StoreHandle {
            url: format!("sqlite://{}#{}", self.location, key),
            key,
            title,
            worksheet: "Sheet1".to_string(),
        }
    }

    fn ensure_exists(conn: &Connection, handle: &StoreHandle) -> SheetResult<()> {
        let exists: Option<String> = conn
            .query_row("SELECT key FROM sheets WHERE key = ?1", params![handle.key], |row| row.get(0))
            .optional()?;
        match exists {
            Some(_) => Ok(()),
            None => Err(SheetError::NotFound(handle.title.clone())),
        }
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl RemoteStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn find_by_name(&self, name: &str) -> SheetResult<Option<StoreHandle>> {
        let conn = self.lock()?;
        let key: Option<String> = conn
            .query_row(
                "SELECT key FROM sheets WHERE title = ?1 ORDER BY created_at LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(key.map(|key| self.handle_for(key, name.to_string())))
    }

    fn open_by_key(&self, key: &str) -> SheetResult<Option<StoreHandle>> {
        let conn = self.lock()?;
        let title: Option<String> = conn
            .query_row("SELECT title FROM sheets WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(title.map(|title| self.handle_for(key.to_string(), title)))
    }

    fn create(&self, name: &str) -> SheetResult<StoreHandle> {
        let conn = self.lock()?;
        let key = uuid::Uuid::new_v4().to_string();
        let stamp = now();
        conn.execute(
            "INSERT INTO sheets (key, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![key, name, stamp],
        )?;
        info!("Created SQLite sheet '{}' ({})", name, key);
        Ok(self.handle_for(key, name.to_string()))
    }

    fn append_row(&self, handle: &StoreHandle, row: &[String]) -> SheetResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::ensure_exists(&tx, handle)?;
        let next_index: i64 = tx.query_row(
            "SELECT COALESCE(MAX(row_index) + 1, 0) FROM sheet_rows WHERE sheet_key = ?1",
            params![handle.key],
            |r| r.get(0),
        )?;
        tx.execute(
            "INSERT INTO sheet_rows (sheet_key, row_index, cells) VALUES (?1, ?2, ?3)",
            params![handle.key, next_index, serde_json::to_string(row)?],
        )?;
        tx.execute(
            "UPDATE sheets SET updated_at = ?2 WHERE key = ?1",
            params![handle.key, now()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn read_all(&self, handle: &StoreHandle) -> SheetResult<RawRows> {
        let conn = self.lock()?;
        Self::ensure_exists(&conn, handle)?;
        let mut stmt = conn.prepare(
            "SELECT cells FROM sheet_rows WHERE sheet_key = ?1 ORDER BY row_index",
        )?;
        let encoded = stmt
            .query_map(params![handle.key], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        let mut rows = Vec::with_capacity(encoded.len());
        for cells in encoded {
            rows.push(serde_json::from_str::<Vec<String>>(&cells)?);
        }
        Ok(rows)
    }

    fn replace_all(&self, handle: &StoreHandle, rows: &[Vec<String>]) -> SheetResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::ensure_exists(&tx, handle)?;
        tx.execute("DELETE FROM sheet_rows WHERE sheet_key = ?1", params![handle.key])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO sheet_rows (sheet_key, row_index, cells) VALUES (?1, ?2, ?3)",
            )?;
            for (idx, row) in rows.iter().enumerate() {
                insert.execute(params![handle.key, idx as i64, serde_json::to_string(row)?])?;
            }
        }
        tx.execute(
            "UPDATE sheets SET updated_at = ?2 WHERE key = ?1",
            params![handle.key, now()],
        )?;
        tx.commit()?;
        debug!("Replaced {} rows in SQLite sheet '{}'", rows.len(), handle.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_create_then_find() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.find_by_name("Crew").unwrap().is_none());

        let created = store.create("Crew").unwrap();
        let found = store.find_by_name("Crew").unwrap().unwrap();
        assert_eq!(created, found);
        assert_eq!(store.open_by_key(&created.key).unwrap(), Some(created));
    }

    #[test]
    fn test_append_then_read_keeps_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let handle = store.create("Crew").unwrap();
        store.append_row(&handle, &s(&["Name", "Age"])).unwrap();
        store.append_row(&handle, &s(&["Ann", "33"])).unwrap();

        assert_eq!(
            store.read_all(&handle).unwrap(),
            vec![s(&["Name", "Age"]), s(&["Ann", "33"])]
        );
    }

    #[test]
    fn test_replace_overwrites_everything() {
        let store = SqliteStore::open_in_memory().unwrap();
        let handle = store.create("Crew").unwrap();
        for row in [s(&["Name"]), s(&["a"]), s(&["b"]), s(&["c"])] {
            store.append_row(&handle, &row).unwrap();
        }

        store.replace_all(&handle, &[s(&["Name"]), s(&["z"])]).unwrap();
        assert_eq!(store.read_all(&handle).unwrap(), vec![s(&["Name"]), s(&["z"])]);
    }

    #[test]
    fn test_unknown_handle_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let ghost = StoreHandle {
            key: "nope".to_string(),
            title: "Ghost".to_string(),
            url: String::new(),
            worksheet: "Sheet1".to_string(),
        };
        assert!(matches!(store.read_all(&ghost), Err(SheetError::NotFound(_))));
        assert!(matches!(
            store.replace_all(&ghost, &[s(&["Name"])]),
            Err(SheetError::NotFound(_))
        ));
    }
}
