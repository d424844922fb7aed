//! Retention pruning
//!
//! Removes the oldest backups, one at a time, until no more than `keep_count`
//! remain. The oldest entry is found with a linear scan on every pass; backup
//! counts are in the tens, so the quadratic cost doesn't matter.
//!
//! An entry that is already gone when we try to delete it still counts as
//! removed. Any other failure stops pruning and is returned with the number of
//! entries removed so far.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{SaveSaverError, SaveSaverResult};

/// One backup unit: an archive file or a backup folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// Full path to the backup
    pub path: PathBuf,
    /// Last time the backup was modified
    pub modified: DateTime<Utc>,
}

impl BackupEntry {
    pub fn new(path: impl Into<PathBuf>, modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// Read the modification time from disk
    pub fn from_path(path: impl Into<PathBuf>) -> SaveSaverResult<Self> {
        let path = path.into();
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| SaveSaverError::from_io(e, &path))?;

        Ok(Self {
            path,
            modified: DateTime::<Utc>::from(modified),
        })
    }

    /// File or folder name, for display
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Delete the oldest entries from disk until at most `keep_count` remain
///
/// Returns how many entries were removed.
pub fn prune(entries: Vec<BackupEntry>, keep_count: usize) -> SaveSaverResult<usize> {
    prune_with(entries, keep_count, remove_entry)
}

/// Same as [`prune`] but with a caller-supplied delete operation
pub fn prune_with<F>(
    mut entries: Vec<BackupEntry>,
    keep_count: usize,
    mut remove: F,
) -> SaveSaverResult<usize>
where
    F: FnMut(&BackupEntry) -> io::Result<()>,
{
    let mut removed = 0;

    while entries.len() > keep_count {
        let Some(index) = oldest_index(&entries) else {
            break;
        };
        let oldest = entries.remove(index);

        match remove(&oldest) {
            Ok(()) => {
                info!(path = %oldest.path.display(), "removed old backup");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %oldest.path.display(), "backup was already gone");
            }
            Err(e) => {
                return Err(SaveSaverError::PruneFailed {
                    path: oldest.path.clone(),
                    removed,
                    source: Box::new(SaveSaverError::from_io(e, &oldest.path)),
                });
            }
        }

        removed += 1;
    }

    Ok(removed)
}

/// Position of the least recently modified entry; the first one wins a tie
fn oldest_index(entries: &[BackupEntry]) -> Option<usize> {
    let mut oldest: Option<(usize, DateTime<Utc>)> = None;

    for (index, entry) in entries.iter().enumerate() {
        match oldest {
            Some((_, time)) if entry.modified >= time => {}
            _ => oldest = Some((index, entry.modified)),
        }
    }

    oldest.map(|(index, _)| index)
}

/// Delete a backup from disk, whether it is a file or a folder
pub fn remove_entry(entry: &BackupEntry) -> io::Result<()> {
    remove_path(&entry.path)
}

fn remove_path(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 5, 17, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    /// Entries named after their age so assertions read naturally
    fn entries(minutes: &[i64]) -> Vec<BackupEntry> {
        minutes
            .iter()
            .map(|m| BackupEntry::new(format!("backup-{}", m), at(*m)))
            .collect()
    }

    fn prune_recording(
        entries: Vec<BackupEntry>,
        keep_count: usize,
    ) -> (SaveSaverResult<usize>, Vec<PathBuf>) {
        let mut deleted = Vec::new();
        let result = prune_with(entries, keep_count, |entry| {
            deleted.push(entry.path.clone());
            Ok(())
        });
        (result, deleted)
    }

    #[test]
    fn test_nothing_to_prune() {
        let (result, deleted) = prune_recording(entries(&[1, 2, 3]), 3);
        assert_eq!(result.unwrap(), 0);
        assert!(deleted.is_empty());

        let (result, deleted) = prune_recording(entries(&[1]), 15);
        assert_eq!(result.unwrap(), 0);
        assert!(deleted.is_empty());

        let (result, _) = prune_recording(Vec::new(), 1);
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_seventeen_entries_keep_fifteen() {
        // Shuffled so the oldest aren't simply at the front
        let minutes = [9, 3, 16, 0, 12, 5, 1, 14, 7, 10, 2, 15, 6, 11, 4, 13, 8];
        let (result, deleted) = prune_recording(entries(&minutes), 15);

        assert_eq!(result.unwrap(), 2);
        assert_eq!(
            deleted,
            vec![PathBuf::from("backup-0"), PathBuf::from("backup-1")]
        );
    }

    #[test]
    fn test_counts_for_every_keep_count() {
        let minutes: Vec<i64> = (0..10).rev().collect();

        for keep in 1..=12usize {
            let (result, deleted) = prune_recording(entries(&minutes), keep);
            let expected = minutes.len().saturating_sub(keep);

            assert_eq!(result.unwrap(), expected, "keep {}", keep);
            assert_eq!(deleted.len(), expected);

            // The survivors are the most recent `keep` entries
            let deleted: HashSet<PathBuf> = deleted.into_iter().collect();
            for m in &minutes {
                let path = PathBuf::from(format!("backup-{}", m));
                let should_remain = (*m as usize) >= minutes.len().saturating_sub(keep);
                assert_eq!(!deleted.contains(&path), should_remain, "keep {} m {}", keep, m);
            }
        }
    }

    #[test]
    fn test_ties_remove_first_seen() {
        let mut list = entries(&[5, 5, 5]);
        list[0].path = PathBuf::from("first");
        list[1].path = PathBuf::from("second");
        list[2].path = PathBuf::from("third");

        let (result, deleted) = prune_recording(list, 1);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(deleted, vec![PathBuf::from("first"), PathBuf::from("second")]);
    }

    #[test]
    fn test_already_deleted_entries_still_count() {
        let result = prune_with(entries(&[1, 2, 3, 4]), 1, |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_permission_error_stops_pruning() {
        let mut calls = 0;
        let result = prune_with(entries(&[5, 4, 3, 2, 1]), 1, |_| {
            calls += 1;
            if calls == 2 {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            } else {
                Ok(())
            }
        });

        match result.unwrap_err() {
            SaveSaverError::PruneFailed {
                path,
                removed,
                source,
            } => {
                assert_eq!(path, PathBuf::from("backup-2"));
                assert_eq!(removed, 1);
                assert!(matches!(*source, SaveSaverError::AccessDenied { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_prune_files_and_folders_on_disk() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now() - std::time::Duration::from_secs(3600);
        let mut list = Vec::new();

        for i in 0..4u64 {
            let path = if i % 2 == 0 {
                let dir = temp.path().join(format!("folder-{}", i));
                fs::create_dir(&dir).unwrap();
                fs::write(dir.join("a.sav"), "x").unwrap();
                dir
            } else {
                let file = temp.path().join(format!("archive-{}.zip", i));
                fs::write(&file, "x").unwrap();
                file
            };
            let modified = base + std::time::Duration::from_secs(i * 60);
            list.push(BackupEntry::new(path, DateTime::<Utc>::from(modified)));
        }

        let removed = prune(list, 2).unwrap();
        assert_eq!(removed, 2);
        assert!(!temp.path().join("folder-0").exists());
        assert!(!temp.path().join("archive-1.zip").exists());
        assert!(temp.path().join("folder-2").exists());
        assert!(temp.path().join("archive-3.zip").exists());
    }

    #[test]
    fn test_prune_missing_path_on_disk() {
        let temp = TempDir::new().unwrap();
        let kept = temp.path().join("kept.zip");
        fs::write(&kept, "x").unwrap();

        let list = vec![
            BackupEntry::new(temp.path().join("vanished.zip"), at(0)),
            BackupEntry::new(kept.clone(), at(1)),
        ];

        assert_eq!(prune(list, 1).unwrap(), 1);
        assert!(kept.exists());
    }

    #[test]
    fn test_entry_from_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Backup.zip");
        fs::write(&file, "x").unwrap();

        let entry = BackupEntry::from_path(&file).unwrap();
        assert_eq!(entry.name(), "Backup.zip");
        assert!(entry.modified <= Utc::now());

        let err = BackupEntry::from_path(temp.path().join("missing")).unwrap_err();
        assert!(err.is_not_found());
    }
}
