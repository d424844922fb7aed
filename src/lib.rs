//! save-saver - timestamped backups of game save files
//!
//! This library copies or archives a game's save files into a dated backup
//! location and prunes the oldest backups once a keep count is exceeded.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings directory, validated configuration, settings file
//! - `error`: Custom error types
//! - `backup`: Labels, scanning, copying/archiving, retention pruning
//! - `notify`: User-facing notifications for reported errors
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use save_saver::backup::{BackupManager, RunOptions};
//! use save_saver::config::{SaverPaths, SettingsStore};
//!
//! let store = SettingsStore::new(&SaverPaths::new()?);
//! let manager = BackupManager::new(&store.load()?, RunOptions::default())?;
//! manager.create_backup_with_retention()?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;

pub use error::{SaveSaverError, SaveSaverResult};
