//! Configuration loading
//!
//! Reads `config.toml` from the user config directory (or an explicit path).
//! A broken file never stops the widget: defaults are used and a warning is
//! returned for the caller to display.

use std::fs;
use std::path::{Path, PathBuf};

mod types;

pub use types::{
    ADMIN_API_PATH, Config, DEFAULT_RECORD_TYPE, HttpConfig, PUBLIC_API_PATH,
    StaleResponsePolicy, WidgetConfig,
};

use crate::error::AutocompleteError;

const APP_DIR: &str = "cms-autocomplete";
const CONFIG_FILE: &str = "config.toml";

/// A loaded configuration plus any problem found while loading it
#[derive(Debug, Clone)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the configuration, falling back to defaults on any error
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load_config(path: Option<&Path>) -> ConfigResult {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => {
                return ConfigResult {
                    config: Config::default(),
                    warning: None,
                };
            }
        },
    };

    if !explicit && !path.exists() {
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    match read_config(&path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("{} (using defaults)", e)),
            }
        }
    }
}

/// Read and parse one config file
pub fn read_config(path: &Path) -> Result<Config, AutocompleteError> {
    let content = fs::read_to_string(path).map_err(|e| AutocompleteError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| AutocompleteError::Config {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
