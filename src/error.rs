//! Custom error types for save-saver
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every file-system failure is classified into
//! one of the known kinds so the CLI can show a readable message instead of
//! crashing; only `Unknown` is allowed to terminate the run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for save-saver operations
#[derive(Error, Debug)]
pub enum SaveSaverError {
    /// Missing, too long, or badly formatted path
    #[error("Invalid path '{path}': {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    /// The process lacks permission for the path
    #[error("Access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    /// Create was requested but the target is already present
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    /// Retrieve, update or delete was requested but the target is absent
    #[error("{} was not found", path.display())]
    NotFound { path: PathBuf },

    /// Locked, in use, network, or other I/O failures
    #[error("I/O error on {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// The source directory does not exist
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A save file could not be copied into the backup folder
    #[error("Failed to copy {} to {}: {reason}", from.display(), to.display())]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// The zip archive could not be written
    #[error("Failed to create archive {}: {reason}", path.display())]
    ArchiveCreation { path: PathBuf, reason: String },

    /// The settings file exists but cannot be parsed
    #[error("Settings file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// A configuration value was rejected
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pruning stopped on a delete that was not a simple disappearance
    #[error(
        "Pruning stopped at {} after removing {removed} backup(s): {source}",
        path.display()
    )]
    PruneFailed {
        path: PathBuf,
        removed: usize,
        #[source]
        source: Box<SaveSaverError>,
    },

    /// Anything not covered above; logged and re-raised
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SaveSaverError {
    /// Classify an I/O error raised while working on `path`
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::InvalidInput => Self::PathInvalid {
                path,
                reason: err.to_string(),
            },
            _ => Self::Io {
                path,
                reason: err.to_string(),
            },
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::DirectoryNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the error belongs to the known taxonomy and should be reported
    /// to the user rather than re-raised
    pub fn is_known(&self) -> bool {
        match self {
            Self::Unknown(_) => false,
            Self::PruneFailed { source, .. } => source.is_known(),
            _ => true,
        }
    }

    /// A sentence suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::PathInvalid { path, .. } => format!(
                "The path '{}' is invalid (it may be missing, too long, or in an unsupported format).",
                path.display()
            ),
            Self::AccessDenied { path } => format!(
                "This application doesn't have access to '{}'.",
                path.display()
            ),
            Self::AlreadyExists { path } => format!(
                "'{}' already exists. Delete it first if you want to replace it.",
                path.display()
            ),
            Self::NotFound { path } => format!("'{}' couldn't be found.", path.display()),
            Self::Io { path, .. } => format!(
                "An input/output error occurred on '{}'. It may be locked or in use by another process.",
                path.display()
            ),
            Self::DirectoryNotFound { path } => format!(
                "The save directory '{}' couldn't be found.",
                path.display()
            ),
            Self::Corrupt { path, .. } => format!(
                "The settings file '{}' couldn't be read because it is damaged.",
                path.display()
            ),
            Self::PruneFailed {
                path,
                removed,
                source,
            } => format!(
                "Old backups could not all be removed ({} removed, stopped at '{}'). {}",
                removed,
                path.display(),
                source.user_message()
            ),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for SaveSaverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unknown(format!("JSON error: {}", err))
    }
}

/// Result type alias for save-saver operations
pub type SaveSaverResult<T> = Result<T, SaveSaverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SaveSaverError::Validation("test error".into());
        assert_eq!(err.to_string(), "Validation error: test error");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_error_classification() {
        let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(SaveSaverError::from_io(not_found, "a").is_not_found());

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            SaveSaverError::from_io(denied, "a"),
            SaveSaverError::AccessDenied { .. }
        ));

        let exists = io::Error::new(io::ErrorKind::AlreadyExists, "there");
        assert!(matches!(
            SaveSaverError::from_io(exists, "a"),
            SaveSaverError::AlreadyExists { .. }
        ));

        let other = io::Error::new(io::ErrorKind::Other, "busy");
        assert!(matches!(
            SaveSaverError::from_io(other, "a"),
            SaveSaverError::Io { .. }
        ));
    }

    #[test]
    fn test_known_errors() {
        assert!(SaveSaverError::NotFound { path: "x".into() }.is_known());
        assert!(!SaveSaverError::Unknown("boom".into()).is_known());

        let wrapped = SaveSaverError::PruneFailed {
            path: "old.zip".into(),
            removed: 1,
            source: Box::new(SaveSaverError::AccessDenied { path: "x".into() }),
        };
        assert!(wrapped.is_known());
        assert!(wrapped.to_string().contains("old.zip"));
        assert!(wrapped.user_message().contains("1 removed"));
    }

    #[test]
    fn test_user_message_mentions_path() {
        let err = SaveSaverError::AccessDenied {
            path: PathBuf::from("/saves"),
        };
        assert!(err.user_message().contains("/saves"));
    }
}
