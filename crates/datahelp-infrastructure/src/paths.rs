//! Unified path management for DataHelp files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/datahelp/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/datahelp/     # Data directory
//! └── store/                   # Key/value records
//!     ├── ngo-language
//!     └── ngo-reports-history
//! ```
//!
//! A base directory override replaces both roots with
//! `<base>/config` and `<base>/data`.

use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR: &str = "datahelp";

/// Errors that can occur during path resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Cannot determine the platform {0} directory")]
    DirNotFound(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct DataHelpPaths {
    base: Option<PathBuf>,
    data_override: Option<PathBuf>,
}

impl DataHelpPaths {
    /// Creates a resolver. `base` relocates everything, mainly for tests.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
            data_override: None,
        }
    }

    /// Uses `dir` as the data directory regardless of the base.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.data_override = dir;
        self
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("config")),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_override {
            return Ok(dir.clone());
        }
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("data")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Directory holding the key/value records.
    pub fn store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("store"))
    }
}
