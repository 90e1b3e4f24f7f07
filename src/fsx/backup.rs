//! On-demand backups of FSx file systems.

use std::collections::BTreeMap;

use super::{Account, BackupOutcome, CommandOutput, FileSystemId, FsxCli};

/// Outcome recorded instead of requesting a backup on a dry run.
pub const DRY_RUN_OUTCOME: &str = "Dry run: backup not requested";

/// Backup outcomes of one account keyed by file system.
pub type BackupOutcomes = BTreeMap<FileSystemId, BackupOutcome>;

/// Requests a backup of every file system in `file_system_ids`, one after another.
///
/// Every id is contained exactly once in the returned map. A failing request
/// doesn't abort the remaining ones, its error text is recorded as outcome.
///
/// # Dry Run
///
/// On a dry run (`dry_run=true`) no backup is requested and every file system
/// is recorded with [DRY_RUN_OUTCOME].
pub fn request_backups<C>(
    cli: &C,
    account: &Account,
    file_system_ids: &[FileSystemId],
    dry_run: bool,
) -> BackupOutcomes
where
    C: FsxCli + ?Sized,
{
    let mut outcomes = BackupOutcomes::new();
    for id in file_system_ids {
        let outcome = if dry_run {
            log::info!(
                target: "fsx::backup",
                "Would request backup of {id} in account {account}"
            );
            DRY_RUN_OUTCOME.to_string()
        } else {
            request_backup(cli, account, id)
        };

        if let Some(previous) = outcomes.insert(id.clone(), outcome) {
            log::debug!(
                target: "fsx::backup",
                "{id} listed twice in account {account}, replacing outcome: {previous}"
            );
        }
    }
    outcomes
}

fn request_backup<C>(cli: &C, account: &Account, file_system_id: &str) -> BackupOutcome
where
    C: FsxCli + ?Sized,
{
    log::debug!(
        target: "fsx::backup",
        "Requesting backup of {file_system_id} in account {account}"
    );

    match cli.create_backup(account, file_system_id) {
        Ok(output) => {
            let outcome = outcome_of(&output);
            if output.stdout.is_empty() {
                log::warn!(
                    target: "fsx::backup",
                    "Backup of {file_system_id} in account {account} failed: {outcome}"
                );
            } else {
                log::info!(
                    target: "fsx::backup",
                    "Backup of {file_system_id} in account {account} requested"
                );
            }
            outcome
        }
        Err(e) => {
            log::error!(
                target: "fsx::backup",
                "Running the aws cli for {file_system_id} in account {account} failed: {e}"
            );
            e.to_string()
        }
    }
}

/// Text recorded for a finished backup request.
///
/// Any data on stdout counts as acknowledgment, otherwise stderr holds the error.
/// The exit status is not consulted.
pub fn outcome_of(output: &CommandOutput) -> BackupOutcome {
    let channel = if output.stdout.is_empty() {
        &output.stderr
    } else {
        &output.stdout
    };
    String::from_utf8_lossy(channel).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsx::testing::FakeFsxCli;

    fn ids(ids: &[&str]) -> Vec<FileSystemId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn records_acknowledgment_and_error_per_file_system() {
        let cli = FakeFsxCli::default()
            .with_backup("dev", "fs-001", "{\"Backup\":{\"BackupId\":\"backup-abc\"}}\n", "")
            .with_backup("dev", "fs-002", "", "FileSystemNotFound\n");
        let account = Account::from("dev");

        let outcomes = request_backups(&cli, &account, &ids(&["fs-001", "fs-002"]), false);

        let expected: BackupOutcomes = [
            (
                "fs-001".to_string(),
                "{\"Backup\":{\"BackupId\":\"backup-abc\"}}".to_string(),
            ),
            ("fs-002".to_string(), "FileSystemNotFound".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(outcomes, expected);
    }

    #[test]
    fn failure_does_not_abort_remaining_requests() {
        let cli = FakeFsxCli::default()
            .with_unreachable_backup("prod", "fs-a")
            .with_backup("prod", "fs-c", "{}", "");

        let account = Account::from("prod");

        let outcomes = request_backups(&cli, &account, &ids(&["fs-a", "fs-b", "fs-c"]), false);

        assert_eq!(
            cli.backup_calls(),
            vec![
                "create-backup prod fs-a",
                "create-backup prod fs-b",
                "create-backup prod fs-c"
            ]
        );
        assert_eq!(outcomes.keys().collect::<Vec<_>>(), vec!["fs-a", "fs-b", "fs-c"]);
        assert_eq!(outcomes["fs-a"], "could not connect to the endpoint URL");
        assert_eq!(
            outcomes["fs-b"],
            "An error occurred (FileSystemNotFound) when calling the CreateBackup operation"
        );
        assert_eq!(outcomes["fs-c"], "{}");
    }

    #[test]
    fn stdout_wins_over_stderr() {
        let output = CommandOutput {
            success: false,
            stdout: b"  accepted \n".to_vec(),
            stderr: b"warning: deprecated option".to_vec(),
        };

        assert_eq!(outcome_of(&output), "accepted");
    }

    #[test]
    fn whitespace_on_stdout_still_counts_as_acknowledgment() {
        let output = CommandOutput {
            success: false,
            stdout: b"\n".to_vec(),
            stderr: b"AccessDenied".to_vec(),
        };

        assert_eq!(outcome_of(&output), "");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let output = CommandOutput {
            success: false,
            stdout: Vec::new(),
            stderr: vec![b'e', 0xff, b'r'],
        };

        assert_eq!(outcome_of(&output), "e\u{fffd}r");
    }

    #[test]
    fn dry_run_requests_nothing() {
        let cli = FakeFsxCli::default();

        let account = Account::from("default");

        let outcomes = request_backups(&cli, &account, &ids(&["fs-1", "fs-2"]), true);

        assert!(cli.calls().is_empty());
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.values().all(|outcome| outcome == DRY_RUN_OUTCOME));
    }

    #[test]
    fn repeated_id_keeps_the_last_outcome() {
        let cli = FakeFsxCli::default().with_backup("dev", "fs-001", "accepted", "");
        let account = Account::from("dev");

        let outcomes = request_backups(&cli, &account, &ids(&["fs-001", "fs-001"]), false);

        assert_eq!(
            cli.backup_calls(),
            vec!["create-backup dev fs-001", "create-backup dev fs-001"]
        );
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes["fs-001"], "accepted");
    }
}
