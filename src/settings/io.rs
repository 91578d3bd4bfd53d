use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;
use bevy::log::{info, error, debug};
use serde::{de::DeserializeOwned, Serialize};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "SheetBridge";
const APPLICATION: &str = "SheetBridge";
const CONFIG_FILE: &str = "app_settings.json";

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(ErrorKind::NotFound, "Could not determine project directories for app settings.")
    })
}

pub fn get_config_path() -> io::Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(CONFIG_FILE))
}

/// Path of `file_name` inside the per-user data directory, created on demand.
pub fn data_file_path(file_name: &str) -> io::Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let data_dir = proj_dirs.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(file_name))
}

/// Reads the settings file, falling back to `T::default()` when it does not exist yet.
pub fn load_settings_from_file<T: DeserializeOwned + Default>() -> io::Result<T> {
    let config_file = get_config_path()?;
    let file = match fs::File::open(&config_file) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("AppSettings: no settings file at {:?}, using defaults.", config_file);
            return Ok(T::default());
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", &config_file, e);
            return Err(e);
        }
    };
    let settings = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        error!("AppSettings: Failed to parse settings file {:?}: {}", &config_file, e);
        io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e))
    })?;
    info!("AppSettings: loaded {:?}", config_file);
    Ok(settings)
}

pub fn save_settings_to_file<T: Serialize>(settings: &T) -> io::Result<PathBuf> {
    let config_file = get_config_path()?;
    info!("AppSettings: Saving settings to {:?}", config_file);
    let file = fs::File::create(&config_file)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("AppSettings: Failed to serialize settings to {:?}: {}", &config_file, e);
        io::Error::new(ErrorKind::Other, e)
    })?;
    Ok(config_file)
}
