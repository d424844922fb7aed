//! Settings persistence
//!
//! Reads and writes the [`Configuration`] as pretty-printed JSON. Writes go to
//! a temp file that is then renamed over the target, so a crash never leaves a
//! half-written settings file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::paths::SaverPaths;
use super::settings::Configuration;
use crate::error::{SaveSaverError, SaveSaverResult};

/// Create, retrieve, update and delete the settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(paths: &SaverPaths) -> Self {
        Self {
            path: paths.settings_file(),
        }
    }

    /// Path of the settings file this store manages
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the settings file has been written
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the settings, failing if the file is missing, unreadable or corrupt
    pub fn load(&self) -> SaveSaverResult<Configuration> {
        let file = File::open(&self.path).map_err(|e| SaveSaverError::from_io(e, &self.path))?;

        let reader = BufReader::new(file);
        let config: Configuration =
            serde_json::from_reader(reader).map_err(|e| SaveSaverError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %self.path.display(), "loaded settings");
        Ok(config)
    }

    /// Load the settings, or return defaults if the file doesn't exist
    pub fn load_or_default(&self) -> SaveSaverResult<Configuration> {
        match self.load() {
            Err(SaveSaverError::NotFound { .. }) => Ok(Configuration::default()),
            other => other,
        }
    }

    /// Write a new settings file. An existing file is never replaced; delete it
    /// first or use [`SettingsStore::update`].
    pub fn create(&self, config: &Configuration) -> SaveSaverResult<()> {
        if self.exists() {
            return Err(SaveSaverError::AlreadyExists {
                path: self.path.clone(),
            });
        }
        self.save(config)
    }

    /// Replace an existing settings file
    pub fn update(&self, config: &Configuration) -> SaveSaverResult<()> {
        if !self.exists() {
            return Err(SaveSaverError::NotFound {
                path: self.path.clone(),
            });
        }
        self.save(config)
    }

    /// Write the settings file, creating or replacing it
    pub fn save(&self, config: &Configuration) -> SaveSaverResult<()> {
        write_json_atomic(&self.path, config)?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    /// Remove the settings file
    pub fn delete(&self) -> SaveSaverResult<()> {
        fs::remove_file(&self.path).map_err(|e| SaveSaverError::from_io(e, &self.path))
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
fn write_json_atomic<T: serde::Serialize>(path: &Path, data: &T) -> SaveSaverResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SaveSaverError::from_io(e, parent))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| SaveSaverError::from_io(e, &temp_path))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;

    writer
        .flush()
        .map_err(|e| SaveSaverError::from_io(e, &temp_path))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SaveSaverError::from_io(e, &temp_path))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SaveSaverError::from_io(e, path)
    })?;

    Ok(())
}
