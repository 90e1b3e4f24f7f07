//! Interaction with the AWS FSx service.
//!
//! The service is reached through the [`FsxCli`] trait. [`AwsCli`] implements
//! it by running the `aws` executable, the functions in [`inventory`] and
//! [`backup`] build on top of it.

mod aws;
pub mod backup;
pub mod inventory;

use std::fmt;
use std::io;
use std::process::Output;

pub use aws::AwsCli;
pub use backup::{request_backups, BackupOutcomes};
pub use inventory::{fetch_file_systems, InventoryError};

/// Identifier of an FSx file system, unique within an [Account].
pub type FileSystemId = String;

/// Raw text returned by a backup request, either the acknowledgment or the error.
pub type BackupOutcome = String;

/// A named AWS CLI profile scoping every request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Key under which the outcomes of this account are listed in the report.
    pub fn report_label(&self) -> String {
        format!("Backups-{}", self.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Account {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Captured result of a single external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited successfully.
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Requests understood by the FSx service.
///
/// Every request is scoped to an [Account] and blocks until the service answered.
/// An [io::Error] means the request could not be issued at all.
pub trait FsxCli {
    /// Lists all file systems visible to `account` as a JSON document.
    fn describe_file_systems(&self, account: &Account) -> io::Result<CommandOutput>;

    /// Requests an on-demand backup of `file_system_id`.
    fn create_backup(&self, account: &Account, file_system_id: &str) -> io::Result<CommandOutput>;
}
