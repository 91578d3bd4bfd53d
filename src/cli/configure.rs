// src/cli/configure.rs
use crate::settings::{io, AppSettings, SettingsOverrides};
use crate::sheets::{SheetError, SheetResult};

pub fn run(overrides: &SettingsOverrides) -> SheetResult<()> {
    let settings = AppSettings::resolve(overrides)?;
    let path = io::save_settings_to_file(&settings).map_err(|e| SheetError::Config(e.to_string()))?;
    println!("Saved settings to {}", path.display());
    println!("  sheet:   {}", settings.store);
    println!("  backend: {:?}", settings.backend);
    if let Some(sqlite_path) = &settings.sqlite_path {
        println!("  sqlite:  {}", sqlite_path.display());
    }
    Ok(())
}
