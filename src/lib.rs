//! Library to create on-demand backups of [AWS FSx][fsx] file systems.
//!
//! Every configured account is inventoried through the `aws` CLI, a backup is
//! requested for each file system found and the collected outcomes are sent
//! as a plain-text [report] to a single recipient.
//!
//! The entry point is [`run::run`].
//!
//! [fsx]: https://aws.amazon.com/fsx/

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod fsx;
pub mod notify;
pub mod report;
pub mod run;
