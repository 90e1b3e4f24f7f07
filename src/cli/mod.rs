use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbosity of the command output.
    #[arg(long)]
    pub verbose: Option<LevelFilter>,

    /// Configuration file. A default one is written if it doesn't exist.
    #[arg(long, short = 'c', env = "FSX_BACKUP_CONFIG", default_value = "/etc/fsx_backup.toml")]
    pub config: PathBuf,

    /// Send the backup report by mail. Otherwise it's printed to stdout.
    #[arg(
        long = "no-notification",
        action=ArgAction::SetFalse
    )]
    pub notification: bool,

    /// List the file systems without requesting backups.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Backup all FSx file systems of the configured accounts. (Default)
    #[default]
    Backup,
}
