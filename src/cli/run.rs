//! Backup CLI commands
//!
//! The default action runs one backup-and-prune cycle. `list` and `prune`
//! work on existing backups only.

use clap::Args;

use crate::backup::{BackupManager, BackupStrategy, Compression, RunOptions};
use crate::config::settings::Configuration;
use crate::error::SaveSaverResult;

/// Seconds to wait before exiting after a run
pub const DEFAULT_EXIT_DELAY_SECS: u64 = 5;

/// Flags shared by every command that touches backups
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// How to store each backup
    #[arg(long, value_enum, default_value_t = BackupStrategy::Archive, global = true)]
    pub strategy: BackupStrategy,

    /// Compression used for archives
    #[arg(long, value_enum, default_value_t = Compression::Optimal, global = true)]
    pub compression: Compression,

    /// Seconds to keep the console open after a backup run
    #[arg(long, default_value_t = DEFAULT_EXIT_DELAY_SECS, global = true)]
    pub exit_delay: u64,
}

impl RunArgs {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            strategy: self.strategy,
            compression: self.compression,
        }
    }
}

/// Message describing how many backups were pruned
pub fn prune_message(removed: usize) -> String {
    match removed {
        0 => "No backups need to be removed.".to_string(),
        1 => "1 backup has been removed.".to_string(),
        n => format!("{} backups have been removed.", n),
    }
}

/// Create one backup, then prune old ones
pub fn handle_run(config: &Configuration, args: &RunArgs) -> SaveSaverResult<usize> {
    let manager = BackupManager::new(config, args.options())?;

    println!("Creating backup...");
    let backup_path = manager.create_backup()?;
    println!("Backup complete: {}", backup_path.display());

    let removed = manager.enforce_retention()?;
    println!("{}", prune_message(removed));

    Ok(removed)
}

/// Only prune, without creating a backup
pub fn handle_prune(config: &Configuration, args: &RunArgs) -> SaveSaverResult<usize> {
    let manager = BackupManager::new(config, args.options())?;
    let removed = manager.enforce_retention()?;
    println!("{}", prune_message(removed));
    Ok(removed)
}

/// Print the existing backups, oldest first
pub fn handle_list(config: &Configuration, args: &RunArgs) -> SaveSaverResult<()> {
    let manager = BackupManager::new(config, args.options())?;
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("No backups found in {}.", manager.backup_dir().display());
        return Ok(());
    }

    println!("Backups (oldest first)");
    println!("======================");

    let now = chrono::Utc::now();
    for (i, backup) in backups.iter().enumerate() {
        let age = now.signed_duration_since(backup.modified);
        println!("  {}. {} ({} ago)", i + 1, backup.name(), format_duration(age));
    }

    println!();
    println!(
        "Total: {} backup(s), keeping {}",
        backups.len(),
        config.keep_count()
    );

    Ok(())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}
