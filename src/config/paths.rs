//! Path management for save-saver
//!
//! The settings file lives in a single well-known directory.
//!
//! ## Path Resolution Order
//!
//! 1. `SAVE_SAVER_DIR` environment variable (if set)
//! 2. The current working directory

use std::path::PathBuf;

use crate::error::SaveSaverError;

/// Name of the settings file inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "Settings.json";

/// Environment variable overriding the settings directory
pub const SETTINGS_DIR_ENV: &str = "SAVE_SAVER_DIR";

/// Manages the paths used by save-saver
#[derive(Debug, Clone)]
pub struct SaverPaths {
    /// Directory holding the settings file
    base_dir: PathBuf,
}

impl SaverPaths {
    /// Create a new SaverPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, SaveSaverError> {
        let base_dir = match std::env::var(SETTINGS_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| SaveSaverError::from_io(e, "."))?,
        };

        Ok(Self { base_dir })
    }

    /// Create SaverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE_NAME)
    }
}
