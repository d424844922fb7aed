//! Backup creation
//!
//! Two ways to produce a backup:
//!
//! - **Structured copy**: eligible save files are copied into
//!   `{backup}/{date}/{time}/`.
//! - **Archive**: the whole save directory is zipped into
//!   `{backup}/Backup for {date} at {time}.zip`.
//!
//! Neither strategy rolls back on failure; files written before an error stay
//! on disk.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::scanner::scan_source_files;
use crate::error::{SaveSaverError, SaveSaverResult};

/// How a backup is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackupStrategy {
    /// One zip archive per backup
    #[default]
    Archive,
    /// Plain copies of the save files in dated folders
    #[value(alias = "structured")]
    Copy,
}

/// Archive compression, trading speed for size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Compression {
    /// Smallest output
    #[default]
    Optimal,
    /// Quickest to write
    Fastest,
    /// Store files uncompressed
    #[value(name = "none")]
    Stored,
}

impl Compression {
    fn file_options(self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default();
        match self {
            Compression::Optimal => options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(9)),
            Compression::Fastest => options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(1)),
            Compression::Stored => options.compression_method(CompressionMethod::Stored),
        }
    }
}

/// File name of the archive for the given labels
pub fn archive_name(date: &str, time: &str) -> String {
    format!("Backup for {} at {}.zip", date, time)
}

/// Copy every eligible file from `source` into `{backup_root}/{date}/{time}`
///
/// Returns the time folder the files were copied into.
pub fn structured_copy(
    source: &Path,
    backup_root: &Path,
    date: &str,
    time: &str,
) -> SaveSaverResult<PathBuf> {
    let files = scan_source_files(source)?;

    let destination = backup_root.join(date).join(time);
    fs::create_dir_all(&destination).map_err(|e| SaveSaverError::FileCopy {
        from: source.to_path_buf(),
        to: destination.clone(),
        reason: e.to_string(),
    })?;

    let copied = copy_files(&files, &destination)?;
    debug!(copied, destination = %destination.display(), "structured copy finished");

    Ok(destination)
}

/// Copy `files` into `destination`, keeping their names
///
/// An existing file at the target is an error; nothing is overwritten.
pub fn copy_files(files: &[PathBuf], destination: &Path) -> SaveSaverResult<usize> {
    let mut copied = 0;

    for file in files {
        let Some(name) = file.file_name() else {
            warn!(path = %file.display(), "skipping path without a file name");
            continue;
        };
        let target = destination.join(name);
        copy_new(file, &target)?;
        debug!(from = %file.display(), to = %target.display(), "copied save file");
        copied += 1;
    }

    Ok(copied)
}

fn copy_new(from: &Path, to: &Path) -> SaveSaverResult<()> {
    let copy_error = |e: io::Error| SaveSaverError::FileCopy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = File::open(from).map_err(copy_error)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .map_err(copy_error)?;

    io::copy(&mut reader, &mut writer).map_err(copy_error)?;
    Ok(())
}

/// Zip the whole `source` tree into a new archive at `destination`
///
/// Entry names are relative to `source`; the source folder itself is not
/// included. A partially written archive is removed on failure.
pub fn create_archive(
    source: &Path,
    destination: &Path,
    compression: Compression,
) -> SaveSaverResult<()> {
    let archive_error = |reason: String| SaveSaverError::ArchiveCreation {
        path: destination.to_path_buf(),
        reason,
    };

    if !source.is_dir() {
        return Err(archive_error(format!(
            "source directory {} does not exist",
            source.display()
        )));
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => archive_error("destination already exists".into()),
            _ => archive_error(e.to_string()),
        })?;

    let result = write_archive(source, file, compression);
    if let Err(reason) = result {
        let _ = fs::remove_file(destination);
        return Err(archive_error(reason));
    }

    Ok(())
}

fn write_archive(source: &Path, file: File, compression: Compression) -> Result<(), String> {
    let options = compression.file_options();
    let mut zip = ZipWriter::new(file);

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| e.to_string())?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| e.to_string())?;
        let name = zip_entry_name(relative);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options).map_err(|e| e.to_string())?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options).map_err(|e| e.to_string())?;
            let mut reader = File::open(entry.path()).map_err(|e| e.to_string())?;
            io::copy(&mut reader, &mut zip).map_err(|e| e.to_string())?;
        }
    }

    zip.finish().map_err(|e| e.to_string())?;
    Ok(())
}

/// Zip entries always use forward slashes
fn zip_entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
