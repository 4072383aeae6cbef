//! Unified path management for Roost files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/roost/             # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/roost/        # Data directory
//! ├── storage.json             # Key-value storage (session snapshot lives here)
//! └── logs/
//!     └── roost.log.YYYY-MM-DD
//! ```
//!
//! A data directory override (from config or `--data-dir`) moves `storage.json`
//! and `logs/` but leaves `config.toml` where it is.

use std::path::PathBuf;

const APP_DIR: &str = "roost";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for roost_core::RoostError {
    fn from(err: PathError) -> Self {
        roost_core::RoostError::config(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoostPaths {
    data_dir_override: Option<PathBuf>,
}

impl RoostPaths {
    /// Creates a path resolver, optionally pinning the data directory.
    pub fn new(data_dir_override: Option<PathBuf>) -> Self {
        Self { data_dir_override }
    }

    /// Returns the Roost configuration directory (e.g. `~/.config/roost/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the Roost data directory (e.g. `~/.local/share/roost/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path of the key-value storage file.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
