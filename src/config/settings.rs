//! User settings for save-saver
//!
//! Three fields drive a run: where the saves live, where backups go, and how
//! many backups to keep. Setters reject blank paths and non-positive counts,
//! keeping the previous value and reporting the rejection to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{SaveSaverError, SaveSaverResult};

/// Number of backups kept when nothing else is configured
pub const DEFAULT_KEEP_COUNT: u32 = 15;

/// Settings for one backup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Configuration {
    /// Directory where the game saves are located
    source_path: String,

    /// Directory where the backups are written
    backup_path: String,

    /// Number of backups to keep before the oldest get pruned
    keep_count: u32,
}

/// On-disk shape of the settings; every field is routed through the setters
#[derive(Deserialize)]
struct SettingsFile {
    #[serde(default)]
    source_path: String,
    #[serde(default)]
    backup_path: String,
    #[serde(default = "default_keep_count")]
    keep_count: i64,
}

fn default_keep_count() -> i64 {
    i64::from(DEFAULT_KEEP_COUNT)
}

impl From<SettingsFile> for Configuration {
    fn from(file: SettingsFile) -> Self {
        let mut config = Configuration::default();
        // Invalid stored values leave the defaults in place.
        let _ = config.set_source_path(file.source_path);
        let _ = config.set_backup_path(file.backup_path);
        let _ = config.set_keep_count(file.keep_count);
        config
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            source_path: String::new(),
            backup_path: String::new(),
            keep_count: DEFAULT_KEEP_COUNT,
        }
    }
}

impl Configuration {
    /// Build a configuration, rejecting the first invalid field
    pub fn new(
        source_path: impl Into<String>,
        backup_path: impl Into<String>,
        keep_count: i64,
    ) -> SaveSaverResult<Self> {
        let mut config = Self::default();
        config.set_source_path(source_path)?;
        config.set_backup_path(backup_path)?;
        config.set_keep_count(keep_count)?;
        Ok(config)
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn backup_path(&self) -> &str {
        &self.backup_path
    }

    pub fn keep_count(&self) -> u32 {
        self.keep_count
    }

    /// Set the save directory; blank values are rejected
    pub fn set_source_path(&mut self, value: impl Into<String>) -> SaveSaverResult<()> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SaveSaverError::Validation(
                "Save location cannot be blank".into(),
            ));
        }
        self.source_path = value;
        Ok(())
    }

    /// Set the backup directory; blank values are rejected
    pub fn set_backup_path(&mut self, value: impl Into<String>) -> SaveSaverResult<()> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SaveSaverError::Validation(
                "Backup location cannot be blank".into(),
            ));
        }
        self.backup_path = value;
        Ok(())
    }

    /// Set the number of backups to keep; zero and negative values are rejected
    pub fn set_keep_count(&mut self, value: i64) -> SaveSaverResult<()> {
        match u32::try_from(value) {
            Ok(count) if count > 0 => {
                self.keep_count = count;
                Ok(())
            }
            _ => Err(SaveSaverError::Validation(format!(
                "Backups to keep must be between 1 and {}, got {}",
                u32::MAX,
                value
            ))),
        }
    }

    /// Check that both directories have been configured
    pub fn ensure_ready(&self) -> SaveSaverResult<()> {
        if self.source_path.is_empty() {
            return Err(SaveSaverError::Validation(
                "No save location has been configured".into(),
            ));
        }
        if self.backup_path.is_empty() {
            return Err(SaveSaverError::Validation(
                "No backup location has been configured".into(),
            ));
        }
        Ok(())
    }
}
