//! A complete backup run over all configured accounts.

use derive_more::{Display, Error, From};

use crate::config::RunConfig;
use crate::fsx::{fetch_file_systems, request_backups, FsxCli, InventoryError};
use crate::notify::{Notifier, NotifyError, SUBJECT};
use crate::report::Report;

#[derive(Debug, Display, Error, From)]
/// Fatal errors aborting a run.
///
/// Failed backups of single file systems are no errors, they are part of the [Report].
pub enum RunError {
    /// Listing the file systems of an account failed.
    #[display("Inventory of FSx file systems failed: {_0}")]
    Inventory(InventoryError),
    /// The report couldn't be delivered.
    #[display("Delivering the backup report failed: {_0}")]
    Notify(NotifyError),
}

/// Requests backups of all file systems of every configured account and
/// delivers the [Report] with `notifier`.
///
/// The inventory of every account is fetched before the first backup is
/// requested, so a misconfigured account aborts the run without side effects.
pub fn run<C, N>(
    config: &RunConfig,
    cli: &C,
    notifier: &N,
    dry_run: bool,
) -> Result<Report, RunError>
where
    C: FsxCli + ?Sized,
    N: Notifier + ?Sized,
{
    let accounts = &config.aws.accounts;
    log::info!(
        target: "run",
        "Backing up FSx file systems of {} account(s)",
        accounts.len()
    );

    let inventories = accounts
        .iter()
        .map(|account| fetch_file_systems(cli, account).map(|ids| (account, ids)))
        .collect::<Result<Vec<_>, InventoryError>>()?;

    let report: Report = inventories
        .into_iter()
        .map(|(account, file_system_ids)| {
            let outcomes = request_backups(cli, account, &file_system_ids, dry_run);
            (account.clone(), outcomes)
        })
        .collect();

    notifier.notify(SUBJECT, &report.body())?;
    log::info!(target: "run", "Finished FSx backup run");

    Ok(report)
}
