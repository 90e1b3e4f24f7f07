use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{Account, CommandOutput, FsxCli};

/// Interaction with FSx using the [`aws` command].
///
/// [`aws` command]: https://docs.aws.amazon.com/cli/latest/reference/fsx/
#[derive(Debug, Clone)]
pub struct AwsCli {
    /// Path to the aws executable.
    aws: PathBuf,
}

impl AwsCli {
    pub fn with_cli_path(cli_path: PathBuf) -> Self {
        if cli_path.is_absolute() && !cli_path.exists() {
            log::warn!(target: "fsx::aws", "aws cli not found at {}", cli_path.display());
        }

        Self { aws: cli_path }
    }

    pub fn cli_path(&self) -> &Path {
        self.aws.as_path()
    }

    fn execute_command(
        &self,
        account: &Account,
        command: &str,
        args: &[&str],
    ) -> io::Result<CommandOutput> {
        log::trace!(
            target: "fsx::aws",
            "Running: {} fsx {command} {} --profile {account}",
            self.aws.display(),
            args.join(" ")
        );

        let output = Command::new(&self.aws)
            .arg("fsx")
            .arg(command)
            .args(args)
            .arg("--profile")
            .arg(account.name())
            .output()?;

        Ok(output.into())
    }
}

impl FsxCli for AwsCli {
    fn describe_file_systems(&self, account: &Account) -> io::Result<CommandOutput> {
        self.execute_command(account, "describe-file-systems", &["--output", "json"])
    }

    fn create_backup(&self, account: &Account, file_system_id: &str) -> io::Result<CommandOutput> {
        self.execute_command(account, "create-backup", &["--file-system-id", file_system_id])
    }
}
