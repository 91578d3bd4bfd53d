// src/sheets/resolver.rs
//! Finds the sheet a session works on, provisioning it on first use.

use bevy::log::{info, warn};

use super::definitions::{default_header_row, StoreHandle, StoreSelector};
use super::error::{SheetError, SheetResult};
use super::remote::RemoteStore;

/// Resolves `selector` to a handle.
///
/// A sheet selected by name is created with the default header when missing.
/// Resolving an existing sheet never writes to it, so calling this repeatedly
/// performs at most one header write in total.
pub fn resolve(store: &dyn RemoteStore, selector: &StoreSelector) -> SheetResult<StoreHandle> {
    match selector {
        StoreSelector::Name(name) => {
            if let Some(handle) = store.find_by_name(name)? {
                info!("Opened existing sheet '{}' ({})", handle.title, handle.key);
                return Ok(handle);
            }
            let handle = store.create(name)?;
            let header = default_header_row();
            if let Err(e) = store.append_row(&handle, &header) {
                warn!(
                    "Sheet '{}' was created but writing its header failed: {}",
                    handle.title, e
                );
                return Err(e);
            }
            info!(
                "Created sheet '{}' ({}) with header {:?}",
                handle.title, handle.key, header
            );
            Ok(handle)
        }
        StoreSelector::Key(key) => store
            .open_by_key(key)?
            .ok_or_else(|| SheetError::NotFound(format!("no sheet with key '{}'", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::remote::MemoryStore;

    #[test]
    fn test_missing_sheet_is_created_with_header() {
        let store = MemoryStore::new();
        let handle = resolve(&store, &StoreSelector::Name("Crew".to_string())).unwrap();

        assert_eq!(handle.title, "Crew");
        assert_eq!(store.raw_rows(&handle.key), Some(vec![default_header_row()]));
        assert_eq!(store.append_count(), 1);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let store = MemoryStore::new();
        let selector = StoreSelector::Name("Crew".to_string());
        let first = resolve(&store, &selector).unwrap();
        let second = resolve(&store, &selector).unwrap();
        let third = resolve(&store, &selector).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(store.create_count(), 1);
        assert_eq!(store.append_count(), 1);
    }

    #[test]
    fn test_existing_empty_sheet_is_left_alone() {
        let store = MemoryStore::new();
        let handle = store.create("Blank").unwrap();

        let resolved = resolve(&store, &StoreSelector::Name("Blank".to_string())).unwrap();
        assert_eq!(resolved, handle);
        assert_eq!(store.append_count(), 0);
        assert_eq!(store.raw_rows(&handle.key), Some(vec![]));
    }

    #[test]
    fn test_unknown_key_is_not_found() {
        let store = MemoryStore::new();
        let err = resolve(&store, &StoreSelector::Key("missing".to_string())).unwrap_err();
        assert!(matches!(err, SheetError::NotFound(_)));
        assert_eq!(store.create_count(), 0);
    }

    #[test]
    fn test_known_key_opens_sheet() {
        let store = MemoryStore::new();
        let handle = resolve(&store, &StoreSelector::Name("Crew".to_string())).unwrap();
        let by_key = resolve(&store, &StoreSelector::Key(handle.key.clone())).unwrap();
        assert_eq!(by_key, handle);
    }

    #[test]
    fn test_access_denied_propagates() {
        let store = MemoryStore::new();
        store.set_deny_access(true);
        let err = resolve(&store, &StoreSelector::Name("Crew".to_string())).unwrap_err();
        assert!(matches!(err, SheetError::Access(_)));
    }
}
