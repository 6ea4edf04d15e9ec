//! Transactional email.
//!
//! Handlers talk to a [`Mailer`]; production uses SendGrid, development falls
//! back to logging the envelope.

mod sendgrid;
pub mod templates;

pub use sendgrid::*;

use async_trait::async_trait;
use thiserror::Error;

/// An outbound message. The sender address belongs to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email transport failed: {0}")]
    Transport(String),
    #[error("Email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Something that can deliver an [`Email`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Mailer that only logs. Used when no provider key is configured.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(
            from = %self.from,
            to = %email.to,
            subject = %email.subject,
            "Email delivery disabled; logging instead of sending"
        );
        Ok(())
    }
}
