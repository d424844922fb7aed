//! Backup system for save-saver
//!
//! Copies save files into a timestamped backup and prunes old backups by
//! count.
//!
//! # Architecture
//!
//! - `label`: folder and file name labels from the local date and time
//! - `scanner`: picks the save files worth copying
//! - `copier`: structured copies and zip archives
//! - `pruner`: oldest-first deletion down to a keep count
//! - `manager`: runs the above for one configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use save_saver::backup::{BackupManager, RunOptions};
//! use save_saver::config::{SaverPaths, SettingsStore};
//!
//! let store = SettingsStore::new(&SaverPaths::new()?);
//! let config = store.load()?;
//! let manager = BackupManager::new(&config, RunOptions::default())?;
//!
//! let (backup_path, removed) = manager.create_backup_with_retention()?;
//! ```

pub mod copier;
pub mod label;
mod manager;
pub mod pruner;
pub mod scanner;

pub use copier::{BackupStrategy, Compression};
pub use manager::{BackupManager, RunOptions};
pub use pruner::{prune, prune_with, BackupEntry};
pub use scanner::scan_source_files;
