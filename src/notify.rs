//! Delivery of the backup report.

use std::io::{self, Write};

use derive_more::{Display, Error, From};
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::NotificationConfig;

/// Subject of the report mail.
pub const SUBJECT: &str = "AWS FSx Quarterly Backup Creation Report";

#[derive(Debug, Display, Error, From)]
/// Errors on delivering the report. Delivery isn't retried.
pub enum NotifyError {
    /// Sender or receiver isn't a valid mail address.
    #[display("Invalid mail address {address}: {source}")]
    InvalidAddress { address: String, source: AddressError },
    /// The mail couldn't be assembled.
    #[display("Building the report mail failed: {_0}")]
    #[from]
    Message(lettre::error::Error),
    /// The relay refused the connection or the mail.
    #[display("Sending the report mail via {relay} failed: {source}")]
    Transport {
        relay: String,
        source: lettre::transport::smtp::Error,
    },
    /// Printing the report failed.
    #[display("Writing the report failed: {_0}")]
    #[from]
    Output(io::Error),
}

/// Delivers a plain-text report to a single recipient.
pub trait Notifier {
    fn notify(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Sends the report through an unauthenticated SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    sender: String,
    receiver: String,
    smtp_server: String,
    smtp_port: u16,
}

impl SmtpNotifier {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            receiver: config.receiver.clone(),
            smtp_server: config.smtp_server.clone(),
            smtp_port: config.smtp_port,
        }
    }

    fn relay(&self) -> String {
        format!("{}:{}", self.smtp_server, self.smtp_port)
    }

    fn message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(parse_mailbox(&self.sender)?)
            .to(parse_mailbox(&self.receiver)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        Ok(message)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

impl Notifier for SmtpNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.message(subject, body)?;

        log::debug!(target: "notify", "Sending report to {} via {}", self.receiver, self.relay());
        // without connection pooling every send opens and quits its own session
        let mailer = SmtpTransport::builder_dangerous(&self.smtp_server)
            .port(self.smtp_port)
            .build();
        mailer
            .send(&message)
            .map_err(|source| NotifyError::Transport {
                relay: self.relay(),
                source,
            })?;

        log::info!(target: "notify", "Report sent to {}", self.receiver);
        Ok(())
    }
}

/// Prints the report instead of mailing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl StdoutNotifier {
    fn write_report<W: Write>(out: &mut W, subject: &str, body: &str) -> io::Result<()> {
        writeln!(out, "Subject: {subject}")?;
        writeln!(out)?;
        write!(out, "{body}")?;
        out.flush()
    }
}

impl Notifier for StdoutNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        Self::write_report(&mut io::stdout().lock(), subject, body)?;
        Ok(())
    }
}
