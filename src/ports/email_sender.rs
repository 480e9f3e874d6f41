//! Outbound email port.
//!
//! The sender address is adapter configuration; messages only name
//! recipients.

use async_trait::async_trait;
use thiserror::Error;

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A plain-text email, optionally with an HTML alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            text: text.into(),
            html: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// The provider refused the message.
    #[error("email rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached.
    #[error("email transport failed: {0}")]
    Transport(String),

    /// The message could not be built.
    #[error("email content invalid: {0}")]
    Content(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}
