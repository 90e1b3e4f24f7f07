//! Textual summary of all backup outcomes of a run.

use std::collections::BTreeMap;
use std::fmt;

use crate::fsx::{Account, BackupOutcomes};

/// Headline of the notification body.
pub const REPORT_TITLE: &str = "### AWS FSx Quarterly Backup Creation Report ###";

/// Backup outcomes of all accounts, keyed by [`Account::report_label`].
///
/// Both levels are kept sorted, so rendering doesn't depend on the order
/// in which FSx reported the file systems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    accounts: BTreeMap<String, BackupOutcomes>,
}

impl Report {
    pub fn accounts(&self) -> &BTreeMap<String, BackupOutcomes> {
        &self.accounts
    }

    pub fn outcomes(&self, account: &Account) -> Option<&BackupOutcomes> {
        self.accounts.get(&account.report_label())
    }

    /// Renders the outcomes, see [format_report].
    pub fn format(&self) -> String {
        format_report(&self.accounts)
    }

    /// Complete notification body including the [REPORT_TITLE].
    pub fn body(&self) -> String {
        format!("{REPORT_TITLE}\n{}\n", self.format())
    }
}

impl FromIterator<(Account, BackupOutcomes)> for Report {
    fn from_iter<T: IntoIterator<Item = (Account, BackupOutcomes)>>(iter: T) -> Self {
        let mut accounts: BTreeMap<String, BackupOutcomes> = BTreeMap::new();
        for (account, outcomes) in iter {
            accounts
                .entry(account.report_label())
                .or_default()
                .extend(outcomes);
        }
        Self { accounts }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Renders every label followed by one `-<file system>: <outcome>` line per file system.
///
/// Each label block starts with an empty line. Labels and file systems are
/// listed in ascending order.
pub fn format_report(accounts: &BTreeMap<String, BackupOutcomes>) -> String {
    let mut out = String::new();
    for (label, outcomes) in accounts {
        out.push('\n');
        out.push_str(label);
        out.push('\n');
        for (file_system_id, outcome) in outcomes {
            out.push_str(&format!("-{file_system_id}: {outcome}\n"));
        }
    }
    out
}
