//! Reading and writing the TOML config file.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Written above the serialized settings by `config init`.
const FILE_HEADER: &str = "# scorereel settings; command-line flags and SCOREREEL_* variables override these.\n\n";

/// Parse `path`; a missing file yields the built-in settings.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    debug!("Loading config from {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config file that [`super::config_file_path`] points at.
pub fn load_default_config() -> Result<Config> {
    match super::config_file_path() {
        Ok(path) => load_config_file(&path),
        Err(e) => {
            debug!("{e}; using default settings");
            Ok(Config::default())
        }
    }
}

/// Write `config` as commented TOML, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let body = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, format!("{FILE_HEADER}{body}")).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save to [`super::config_file_path`], returning where it went.
pub fn save_default_config(config: &Config) -> Result<PathBuf> {
    let path = super::config_file_path()?;
    save_config(config, &path)?;
    Ok(path)
}
