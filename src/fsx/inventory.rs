//! Inventory of the file systems managed in an [Account].

use std::io;

use derive_more::{Display, Error};

use super::{Account, FileSystemId, FsxCli};

/// Errors on listing the file systems of an [Account].
///
/// Any of these aborts the run, a misconfigured account must not be skipped silently.
#[derive(Debug, Display, Error)]
pub enum InventoryError {
    /// The aws cli could not be executed.
    #[display("Running the aws cli for account {account} failed: {source}")]
    CommandNotRun { account: Account, source: io::Error },
    /// The aws cli exited unsuccessfully.
    #[display("Listing file systems of account {account} failed: {stderr}")]
    CommandFailed { account: Account, stderr: String },
    /// The response isn't a valid `describe-file-systems` document.
    #[display("Invalid file system listing for account {account}: {source}")]
    InvalidResponse {
        account: Account,
        source: serde_json::Error,
    },
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeFileSystems {
    file_systems: Vec<FileSystemRecord>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileSystemRecord {
    file_system_id: FileSystemId,
}

/// Returns the ids of all file systems of `account` in the order reported by FSx.
pub fn fetch_file_systems<C>(
    cli: &C,
    account: &Account,
) -> Result<Vec<FileSystemId>, InventoryError>
where
    C: FsxCli + ?Sized,
{
    log::debug!(target: "fsx::inventory", "Listing file systems of account {account}");

    let output = cli
        .describe_file_systems(account)
        .map_err(|source| InventoryError::CommandNotRun {
            account: account.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.success {
        return Err(InventoryError::CommandFailed {
            account: account.clone(),
            stderr: stderr.trim().to_string(),
        });
    }

    // relay stderr
    if !stderr.trim().is_empty() {
        log::warn!(target: "fsx::inventory", "{}", stderr.trim_end());
    }

    let listing: DescribeFileSystems = serde_json::from_slice(&output.stdout).map_err(|source| {
        InventoryError::InvalidResponse {
            account: account.clone(),
            source,
        }
    })?;

    let ids: Vec<_> = listing
        .file_systems
        .into_iter()
        .map(|record| record.file_system_id)
        .collect();
    log::info!(
        target: "fsx::inventory",
        "Found {} file system(s) in account {account}",
        ids.len()
    );

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsx::testing::FakeFsxCli;
    use crate::fsx::CommandOutput;

    #[test]
    fn returns_ids_in_service_order() {
        let cli = FakeFsxCli::default().with_file_systems("dev", &["fs-002", "fs-001"]);

        let ids = fetch_file_systems(&cli, &Account::from("dev")).unwrap();

        assert_eq!(ids, vec!["fs-002", "fs-001"]);
        assert_eq!(cli.calls(), vec!["describe-file-systems dev"]);
    }

    #[test]
    fn empty_listing_yields_no_ids() {
        let cli = FakeFsxCli::default().with_file_systems("default", &[]);

        let ids = fetch_file_systems(&cli, &Account::from("default")).unwrap();

        assert!(ids.is_empty());
    }

    #[test]
    fn ignores_unknown_record_fields() {
        let body = r#"{
            "FileSystems": [
                {"OwnerId": "123456789012", "FileSystemId": "fs-0abc", "StorageCapacity": 300}
            ],
            "NextToken": null
        }"#;
        let cli = FakeFsxCli::default().with_inventory_output(
            "prod",
            CommandOutput {
                success: true,
                stdout: body.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        );

        let ids = fetch_file_systems(&cli, &Account::from("prod")).unwrap();

        assert_eq!(ids, vec!["fs-0abc"]);
    }

    #[test]
    fn non_zero_exit_is_fatal() {
        let cli = FakeFsxCli::default();

        let err = fetch_file_systems(&cli, &Account::from("prod")).unwrap_err();

        match err {
            InventoryError::CommandFailed { account, stderr } => {
                assert_eq!(account, Account::from("prod"));
                assert_eq!(stderr, "The config profile (prod) could not be found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreachable_service_is_fatal() {
        let cli = FakeFsxCli::default().with_unreachable_inventory("prod");

        let err = fetch_file_systems(&cli, &Account::from("prod")).unwrap_err();

        assert!(matches!(err, InventoryError::CommandNotRun { .. }));
        assert!(err.to_string().contains("account prod"));
    }

    #[test]
    fn malformed_response_is_fatal() {
        let cli = FakeFsxCli::default().with_inventory_output(
            "dev",
            CommandOutput {
                success: true,
                stdout: b"{\"Unexpected\": []}".to_vec(),
                stderr: Vec::new(),
            },
        );

        let err = fetch_file_systems(&cli, &Account::from("dev")).unwrap_err();

        assert!(matches!(err, InventoryError::InvalidResponse { .. }));
    }
}
