//! Backup manager for save-saver
//!
//! Runs one configured backup and enforces the retention count afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::copier::{archive_name, create_archive, structured_copy, BackupStrategy, Compression};
use super::label::{date_label, parse_date_label, time_label};
use super::pruner::{prune, BackupEntry};
use crate::config::settings::Configuration;
use crate::error::{SaveSaverError, SaveSaverResult};

/// Options that vary per invocation rather than per settings file
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub strategy: BackupStrategy,
    pub compression: Compression,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Directory holding the game saves
    source_dir: PathBuf,
    /// Directory holding the backups
    backup_dir: PathBuf,
    /// How many backups survive pruning
    keep_count: usize,
    options: RunOptions,
}

impl BackupManager {
    /// Create a new BackupManager
    ///
    /// Fails if either directory has not been configured.
    pub fn new(config: &Configuration, options: RunOptions) -> SaveSaverResult<Self> {
        config.ensure_ready()?;

        Ok(Self {
            source_dir: PathBuf::from(config.source_path()),
            backup_dir: PathBuf::from(config.backup_path()),
            keep_count: config.keep_count() as usize,
            options,
        })
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Create a backup labelled with the current local date and time
    ///
    /// Returns the archive file or the time folder that was written.
    pub fn create_backup(&self) -> SaveSaverResult<PathBuf> {
        self.create_backup_labelled(&date_label(), &time_label(true))
    }

    /// Create a backup with explicit labels
    pub fn create_backup_labelled(&self, date: &str, time: &str) -> SaveSaverResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| SaveSaverError::from_io(e, &self.backup_dir))?;

        let path = match self.options.strategy {
            BackupStrategy::Archive => {
                let destination = self.backup_dir.join(archive_name(date, time));
                create_archive(&self.source_dir, &destination, self.options.compression)?;
                destination
            }
            BackupStrategy::Copy => structured_copy(&self.source_dir, &self.backup_dir, date, time)?,
        };

        info!(path = %path.display(), strategy = ?self.options.strategy, "backup created");
        Ok(path)
    }

    /// List existing backups for the current strategy, oldest first
    ///
    /// Archives are the `.zip` files directly in the backup directory. Copies
    /// are the time folders inside each date folder.
    pub fn list_backups(&self) -> SaveSaverResult<Vec<BackupEntry>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = match self.options.strategy {
            BackupStrategy::Archive => child_entries(&self.backup_dir, |path| {
                path.is_file() && path.extension().map_or(false, |ext| ext == "zip")
            })?,
            BackupStrategy::Copy => {
                let mut entries = Vec::new();
                for date_dir in child_paths(&self.backup_dir, Path::is_dir)? {
                    entries.extend(child_entries(&date_dir, Path::is_dir)?);
                }
                entries
            }
        };

        backups.sort_by(|a, b| a.modified.cmp(&b.modified));
        Ok(backups)
    }

    /// Delete the oldest backups beyond the keep count
    ///
    /// Returns how many backups were removed.
    pub fn enforce_retention(&self) -> SaveSaverResult<usize> {
        let backups = self.list_backups()?;
        debug!(found = backups.len(), keep = self.keep_count, "enforcing retention");

        let removed = prune(backups, self.keep_count)?;

        if self.options.strategy == BackupStrategy::Copy {
            self.remove_empty_date_folders()?;
        }

        Ok(removed)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> SaveSaverResult<(PathBuf, usize)> {
        let backup_path = self.create_backup()?;
        let removed = self.enforce_retention()?;
        Ok((backup_path, removed))
    }

    /// Remove date folders left empty by pruning; other folders are left alone
    fn remove_empty_date_folders(&self) -> SaveSaverResult<()> {
        for date_dir in child_paths(&self.backup_dir, is_date_folder)? {
            let is_empty = fs::read_dir(&date_dir)
                .map_err(|e| SaveSaverError::from_io(e, &date_dir))?
                .next()
                .is_none();

            if is_empty {
                fs::remove_dir(&date_dir).map_err(|e| SaveSaverError::from_io(e, &date_dir))?;
                debug!(path = %date_dir.display(), "removed empty date folder");
            }
        }
        Ok(())
    }
}

fn is_date_folder(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_date_label)
            .is_some()
}

fn child_paths(dir: &Path, keep: impl Fn(&Path) -> bool) -> SaveSaverResult<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| SaveSaverError::from_io(e, dir))? {
        let entry = entry.map_err(|e| SaveSaverError::from_io(e, dir))?;
        let path = entry.path();
        if keep(&path) {
            paths.push(path);
        }
    }

    Ok(paths)
}

fn child_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> SaveSaverResult<Vec<BackupEntry>> {
    child_paths(dir, keep)?
        .into_iter()
        .map(BackupEntry::from_path)
        .collect()
}
