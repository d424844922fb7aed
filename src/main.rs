use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use save_saver::cli::{
    handle_list, handle_prune, handle_run, handle_settings_command, load_for_run, RunArgs,
    SettingsCommands,
};
use save_saver::config::{SaverPaths, SettingsStore};
use save_saver::notify::{ConsoleNotifier, Notifier};
use save_saver::SaveSaverResult;

#[derive(Parser)]
#[command(
    name = "save-saver",
    version,
    about = "Timestamped backups of game save files",
    long_about = "save-saver copies or zips a game's save files into a dated backup \
                  folder and removes the oldest backups once more than the configured \
                  number exist. Run without a command to perform one backup."
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List existing backups, oldest first
    List,

    /// Remove old backups without creating a new one
    Prune,

    #[command(flatten)]
    Settings(SettingsCommands),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let notifier = ConsoleNotifier;
    let is_backup_run = cli.command.is_none();
    let exit_delay = Duration::from_secs(cli.run.exit_delay);

    match dispatch(&cli, &notifier) {
        Ok(()) => {
            if is_backup_run {
                std::thread::sleep(exit_delay);
            }
            Ok(())
        }
        Err(e) if e.is_known() => {
            notifier.show_error(&e);
            if is_backup_run {
                std::thread::sleep(exit_delay);
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "unexpected failure");
            Err(e.into())
        }
    }
}

fn dispatch(cli: &Cli, notifier: &dyn Notifier) -> SaveSaverResult<()> {
    let paths = SaverPaths::new()?;
    let store = SettingsStore::new(&paths);

    match &cli.command {
        None => {
            let config = load_for_run(&store)?;
            handle_run(&config, &cli.run)?;
        }
        Some(Commands::List) => handle_list(&load_for_run(&store)?, &cli.run)?,
        Some(Commands::Prune) => {
            handle_prune(&load_for_run(&store)?, &cli.run)?;
        }
        Some(Commands::Settings(cmd)) => handle_settings_command(&store, notifier, cmd.clone())?,
    }

    Ok(())
}

/// Log to stderr so the console trail on stdout stays clean
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
