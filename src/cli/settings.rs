//! Settings CLI commands
//!
//! Create, show, change and delete the settings file.

use clap::Subcommand;

use crate::config::settings::{Configuration, DEFAULT_KEEP_COUNT};
use crate::config::store::SettingsStore;
use crate::error::SaveSaverResult;
use crate::notify::{Notification, Notifier};

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommands {
    /// Create the settings file (refuses to overwrite an existing one)
    Init {
        /// Directory containing the game saves
        #[arg(long)]
        source: String,
        /// Directory to write backups into
        #[arg(long)]
        backup: String,
        /// Number of backups to keep
        #[arg(long, default_value_t = i64::from(DEFAULT_KEEP_COUNT), allow_negative_numbers = true)]
        keep: i64,
    },

    /// Change one or more settings
    Set {
        /// Directory containing the game saves
        #[arg(long)]
        source: Option<String>,
        /// Directory to write backups into
        #[arg(long)]
        backup: Option<String>,
        /// Number of backups to keep
        #[arg(long, allow_negative_numbers = true)]
        keep: Option<i64>,
    },

    /// Show the current settings
    Config,

    /// Delete the settings file
    Reset,
}

/// Handle a settings command
pub fn handle_settings_command(
    store: &SettingsStore,
    notifier: &dyn Notifier,
    cmd: SettingsCommands,
) -> SaveSaverResult<()> {
    match cmd {
        SettingsCommands::Init {
            source,
            backup,
            keep,
        } => {
            let config = Configuration::new(source, backup, keep)?;
            store.create(&config)?;
            println!("Settings created at {}", store.path().display());
        }

        SettingsCommands::Set {
            source,
            backup,
            keep,
        } => {
            let mut config = store.load()?;
            let mut rejected = 0;

            let results = [
                source.map(|v| config.set_source_path(v)),
                backup.map(|v| config.set_backup_path(v)),
                keep.map(|v| config.set_keep_count(v)),
            ];
            for result in results.into_iter().flatten() {
                if let Err(e) = result {
                    rejected += 1;
                    notifier.notify(&Notification::warning(format!(
                        "{} (previous value kept)",
                        e
                    )));
                }
            }

            store.update(&config)?;
            if rejected == 0 {
                println!("Settings updated.");
            } else {
                println!("Settings updated; {} value(s) were rejected.", rejected);
            }
        }

        SettingsCommands::Config => {
            let config = store.load_or_default()?;
            println!("save-saver Configuration");
            println!("========================");
            let status = if store.exists() { "" } else { " (missing)" };
            println!("Settings file:   {}{}", store.path().display(), status);
            println!("Save location:   {}", display_or_unset(config.source_path()));
            println!("Backup location: {}", display_or_unset(config.backup_path()));
            println!("Backups to keep: {}", config.keep_count());
        }

        SettingsCommands::Reset => {
            store.delete()?;
            println!("Settings file deleted.");
        }
    }

    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Load settings for a backup run
pub fn load_for_run(store: &SettingsStore) -> SaveSaverResult<Configuration> {
    let config = store.load()?;
    config.ensure_ready()?;
    Ok(config)
}
