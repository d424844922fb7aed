//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup and settings layers.

pub mod run;
pub mod settings;

pub use run::{handle_list, handle_prune, handle_run, prune_message, RunArgs};
pub use settings::{handle_settings_command, load_for_run, SettingsCommands};
