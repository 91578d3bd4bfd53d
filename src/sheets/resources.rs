// src/sheets/resources.rs
use bevy::prelude::*;

use super::definitions::StoreHandle;
use super::error::{SheetError, SheetResult};
use super::remote::{self, RemoteStore};
use super::sheet_table::Table;
use super::sync::SheetSession;
use crate::settings::AppSettings;

/// Effective settings for this run, fixed at startup.
#[derive(Resource, Debug, Clone)]
pub struct SheetConfig(pub AppSettings);

/// Builds the store for a session. Swapped out in tests.
pub type StoreFactory = fn(&AppSettings) -> SheetResult<Box<dyn RemoteStore>>;

#[derive(Resource, Clone, Copy)]
pub struct SheetStoreFactory(pub StoreFactory);

impl Default for SheetStoreFactory {
    fn default() -> Self {
        Self(remote::connect)
    }
}

/// The open sheet and the snapshot the UI renders from.
///
/// The UI never calls into the session; systems refresh `view` after each
/// operation so a failed read is reported once instead of every frame.
#[derive(Resource, Default)]
pub struct ActiveSheet {
    session: Option<SheetSession>,
    view: Option<Table>,
    open_error: Option<String>,
}

impl ActiveSheet {
    pub fn set_session(&mut self, session: SheetSession) {
        self.session = Some(session);
        self.view = None;
        self.open_error = None;
    }

    pub fn set_open_error(&mut self, error: &SheetError) {
        self.session = None;
        self.view = None;
        self.open_error = Some(error.to_string());
    }

    pub fn session_mut(&mut self) -> Option<&mut SheetSession> {
        self.session.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn handle(&self) -> Option<&StoreHandle> {
        self.session.as_ref().map(SheetSession::handle)
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.session.as_ref().map(SheetSession::backend_name)
    }

    pub fn view(&self) -> Option<&Table> {
        self.view.as_ref()
    }

    pub fn open_error(&self) -> Option<&str> {
        self.open_error.as_deref()
    }

    /// Loads through the session cache and stores a copy for rendering.
    /// The previous view is cleared when the load fails.
    pub fn reload_view(&mut self, force: bool) -> SheetResult<&Table> {
        let Some(session) = self.session.as_mut() else {
            return Err(SheetError::NotFound("no sheet is open".to_string()));
        };
        self.view = None;
        let table = if force { session.refresh()? } else { session.load()? };
        Ok(self.view.insert(table.clone()))
    }
}
