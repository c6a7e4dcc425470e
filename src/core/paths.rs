// src/core/paths.rs

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV_VAR, GLOBAL_CONFIG_FILENAME, STATE_FILENAME};
use lazy_static::lazy_static;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

lazy_static! {
    static ref RUNDEV_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not determine the user's home directory.")]
    HomeDirNotFound,
}

/// Returns the path to the rundev configuration directory (`~/.config/rundev`),
/// or the value of `RUNDEV_CONFIG_DIR` when that variable is set.
///
/// The directory is not created here; only writers need it to exist.
/// Memoized: the first call computes the path, later calls return the cached value.
pub fn get_rundev_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = RUNDEV_CONFIG_DIR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = match env::var_os(CONFIG_DIR_ENV_VAR).filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        // Deliberately `~/.config` on every platform, not `dirs::config_dir()`.
        None => dirs::home_dir()
            .ok_or(PathError::HomeDirNotFound)?
            .join(".config")
            .join(APP_DIR_NAME),
    };
    log::debug!("rundev config dir: {}", config_path.display());

    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// Returns the path to the global `config.json`.
pub fn get_global_config_path() -> Result<PathBuf, PathError> {
    get_rundev_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILENAME))
}

/// Returns the path to the persisted last-script record.
pub fn get_state_path() -> Result<PathBuf, PathError> {
    get_rundev_config_dir().map(|dir| dir.join(STATE_FILENAME))
}

/// The user's home directory as a string, used for `~` expansion.
pub fn home_dir_string() -> Option<String> {
    dirs::home_dir().map(|p| p.to_string_lossy().into_owned())
}

/// Renders a path in the `/`-separated form that directory patterns are written in.
pub fn to_pattern_subject(path: &Path) -> String {
    let rendered = dunce::simplified(path).to_string_lossy();
    if cfg!(target_os = "windows") {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}
