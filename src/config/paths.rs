//! Where the config file lives.

use crate::constants::{APP_NAME, CONFIG_PATH_ENV};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Per-user configuration directory.
///
/// - Linux: `~/.config/scorereel/`
/// - macOS: `~/Library/Application Support/scorereel/`
/// - Windows: `%APPDATA%\scorereel\config\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Config file in use: `$SCOREREEL_CONFIG` when set, else `config.toml` in [`config_dir`].
pub fn config_file_path() -> Result<PathBuf> {
    resolve_config_file(std::env::var_os(CONFIG_PATH_ENV))
}

fn resolve_config_file(explicit: Option<OsString>) -> Result<PathBuf> {
    match explicit.filter(|value| !value.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}
