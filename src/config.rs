//! Configuration of a backup run, read from a toml file.

use std::io;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};

use crate::fsx::Account;

const DEFAULT_AWS_CLI_PATH: &str = "/usr/local/bin/aws";
const DEFAULT_ACCOUNTS: [&str; 3] = ["default", "dev", "prod"];
const DEFAULT_SMTP_PORT: u16 = 25;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Configuration passed to [`run`](crate::run::run).
pub struct RunConfig {
    /// Access to FSx.
    #[serde(default)]
    pub aws: AwsConfig,

    /// Delivery of the report.
    #[serde(default)]
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AwsConfig {
    /// Path of the `aws` executable.
    #[serde(default = "default_cli_path")]
    pub cli_path: PathBuf,

    /// Profiles of the accounts to backup, processed in this order.
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            cli_path: default_cli_path(),
            accounts: default_accounts(),
        }
    }
}

fn default_cli_path() -> PathBuf {
    PathBuf::from(DEFAULT_AWS_CLI_PATH)
}

fn default_accounts() -> Vec<Account> {
    DEFAULT_ACCOUNTS.into_iter().map(Account::from).collect()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NotificationConfig {
    /// Address the report is sent from.
    pub sender: String,

    /// Single recipient of the report.
    pub receiver: String,

    /// Host of the SMTP relay.
    pub smtp_server: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sender: "fsx-backup@localhost".to_string(),
            receiver: "root@localhost".to_string(),
            smtp_server: "localhost".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Display, Error)]
/// Errors on loading the [RunConfig].
pub enum ConfigError {
    #[display("Reading the config file {} failed: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("Parsing the config file {} failed: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl RunConfig {
    /// Reads the config at `path`.
    ///
    /// A missing file is created with the default config, which is then used.
    /// Failing to write it is only logged.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(config_str) => toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    target: "config",
                    "Writing default config to {} because it doesn't exist yet",
                    path.display()
                );
                let default_config = Self::default();
                match toml::to_string_pretty(&default_config) {
                    Ok(config_str) => {
                        if let Err(e) = std::fs::write(path, config_str) {
                            log::warn!(
                                target: "config",
                                "Writing default config to {} failed {e}",
                                path.display()
                            );
                        }
                    }
                    Err(e) => {
                        log::warn!(target: "config", "Serializing the default config failed: {e}")
                    }
                }

                Ok(default_config)
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
