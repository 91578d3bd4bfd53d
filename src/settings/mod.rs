pub mod io;

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::sheets::definitions::StoreSelector;
use crate::sheets::error::{SheetError, SheetResult};

pub const ENV_SHEET: &str = "SHEETBRIDGE_SHEET";
pub const ENV_SHEET_KEY: &str = "SHEETBRIDGE_SHEET_KEY";
pub const ENV_BACKEND: &str = "SHEETBRIDGE_BACKEND";
pub const ENV_SQLITE_PATH: &str = "SHEETBRIDGE_SQLITE_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Google,
    Sqlite,
    Memory,
}

impl BackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub store: StoreSelector,
    pub backend: BackendKind,
    pub sqlite_path: Option<PathBuf>,
}

/// Values given on the command line. Each one beats env and file settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub sheet_name: Option<String>,
    pub sheet_key: Option<String>,
    pub backend: Option<BackendKind>,
    pub sqlite_path: Option<PathBuf>,
}

impl AppSettings {
    /// File settings, then environment, then command-line overrides.
    pub fn resolve(overrides: &SettingsOverrides) -> SheetResult<Self> {
        let mut settings: AppSettings = io::load_settings_from_file()
            .map_err(|e| SheetError::Config(e.to_string()))?;
        settings.apply_env(|name| std::env::var(name).ok())?;
        settings.apply_overrides(overrides);
        Ok(settings)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> SheetResult<()> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(ENV_SHEET_KEY) {
            self.store = StoreSelector::Key(key);
        } else if let Some(name) = non_empty(ENV_SHEET) {
            self.store = StoreSelector::Name(name);
        }
        if let Some(raw) = non_empty(ENV_BACKEND) {
            self.backend = BackendKind::parse(&raw).ok_or_else(|| {
                SheetError::Config(format!("{} has unknown backend '{}'", ENV_BACKEND, raw))
            })?;
        }
        if let Some(path) = non_empty(ENV_SQLITE_PATH) {
            self.sqlite_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(key) = &overrides.sheet_key {
            self.store = StoreSelector::Key(key.clone());
        } else if let Some(name) = &overrides.sheet_name {
            self.store = StoreSelector::Name(name.clone());
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(path) = &overrides.sqlite_path {
            self.sqlite_path = Some(path.clone());
        }
    }
}
