use std::process::ExitCode;

use clap::Parser;
use fsx_backup_lib::cli::{Action, Cli};
use fsx_backup_lib::config::RunConfig;
use fsx_backup_lib::fsx::AwsCli;
use fsx_backup_lib::notify::{SmtpNotifier, StdoutNotifier};
use fsx_backup_lib::run::run;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Action::Backup = cli.action.unwrap_or_default();

    // init logger
    let mut env_logger = env_logger::builder();
    if let Some(level) = cli.verbose {
        env_logger.filter_level(level);
    }
    if let Err(e) = env_logger.try_init() {
        eprintln!("Initializing the logger failed: {e}");
    }

    let config = match RunConfig::load_or_create(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!(target: "config", "{e}");
            return ExitCode::FAILURE;
        }
    };

    let dry_run = cli.dry_run;
    if dry_run {
        log::warn!("Running in dry-run mode");
    }

    let aws = AwsCli::with_cli_path(config.aws.cli_path.clone());
    let result = if cli.notification {
        run(&config, &aws, &SmtpNotifier::new(&config.notification), dry_run)
    } else {
        run(&config, &aws, &StdoutNotifier, dry_run)
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(target: "run", "FSx backup run aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
