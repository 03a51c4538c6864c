use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SessionConfig;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Failure to read or parse the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads session settings from `path`, or from [`settings_path`] when `None`.
///
/// Returns the defaults when the file does not exist yet. Fields missing
/// from the file keep their default values.
pub fn load_settings(path: Option<&Path>) -> Result<SessionConfig, SettingsError> {
    match path {
        Some(path) => load_settings_from_path(path),
        None => load_settings_from_path(&settings_path()),
    }
}

fn load_settings_from_path(path: &Path) -> Result<SessionConfig, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(SessionConfig::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded settings from {}", path.display());
    Ok(config)
}
