//! Email backup
//!
//! Mails the database file to the user's own Gmail address over STARTTLS.
//! Gmail only accepts an app password here, so every failure message carries
//! a reminder about it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{ExpenseError, ExpenseResult};

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

pub const MISSING_CREDENTIALS_MSG: &str = "Please provide both Gmail and App Password.";
pub const APP_PASSWORD_HINT: &str =
    "Note: You must use a Google 'App Password', not your regular login password.";
pub const SUCCESS_MSG: &str = "Backup sent successfully to your Gmail!";

const BODY: &str = "Attached is your latest Expense Manager database backup.";

/// One email backup request
///
/// Holds only owned values so it can be moved into a worker thread.
#[derive(Clone)]
pub struct EmailBackup {
    address: String,
    password: String,
    database: PathBuf,
}

impl std::fmt::Debug for EmailBackup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailBackup")
            .field("address", &self.address)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl EmailBackup {
    /// Validate inputs; nothing touches the network here
    pub fn new(
        address: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<PathBuf>,
    ) -> ExpenseResult<Self> {
        let address = address.into().trim().to_string();
        let password = password.into();
        if address.is_empty() || password.is_empty() {
            return Err(ExpenseError::Validation(MISSING_CREDENTIALS_MSG.into()));
        }
        Ok(Self {
            address,
            password,
            database: database.into(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Subject line for a backup sent at `now`
    pub fn subject(now: DateTime<Local>) -> String {
        format!("Expense Manager Backup - {}", now.format("%Y-%m-%d %H:%M"))
    }

    /// Build the message with the database attached
    pub fn build_message(&self, now: DateTime<Local>) -> ExpenseResult<Message> {
        let mailbox: Mailbox = self
            .address
            .parse()
            .map_err(|e| with_hint(format!("Invalid email address '{}': {}", self.address, e)))?;

        let bytes = fs::read(&self.database)
            .map_err(|e| ExpenseError::Io(format!("Failed to read database for backup: {}", e)))?;
        let filename = self
            .database
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "expense_manager.db".to_string());

        let octet_stream = ContentType::parse("application/octet-stream")
            .map_err(|e| ExpenseError::Backup(e.to_string()))?;

        Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(Self::subject(now))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(BODY.to_string()))
                    .singlepart(Attachment::new(filename).body(bytes, octet_stream)),
            )
            .map_err(|e| with_hint(format!("Failed to build backup email: {}", e)))
    }

    /// Build and send the backup. Blocking.
    pub fn send(&self) -> ExpenseResult<()> {
        let message = self.build_message(Local::now())?;

        let mailer = SmtpTransport::starttls_relay(SMTP_HOST)
            .map_err(|e| with_hint(format!("Error: {}", e)))?
            .port(SMTP_PORT)
            .credentials(Credentials::new(self.address.clone(), self.password.clone()))
            .build();

        log::info!("Sending database backup to {}", self.address);
        mailer.send(&message).map_err(|e| {
            log::warn!("Email backup failed: {}", e);
            with_hint(format!("Error: {}", e))
        })?;
        log::info!("Email backup sent");
        Ok(())
    }
}

fn with_hint(message: String) -> ExpenseError {
    ExpenseError::Backup(format!("{}\n\n{}", message, APP_PASSWORD_HINT))
}
