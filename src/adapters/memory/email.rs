//! Email sender that records messages instead of sending them.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{EmailError, EmailMessage, EmailSender};

#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    reject: Option<String>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender that rejects every message addressed to `address`.
    pub fn rejecting(address: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            reject: Some(address.into()),
        }
    }

    /// Messages accepted so far, in send order.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if let Some(reject) = &self.reject {
            if message.to.iter().any(|to| to == reject) {
                return Err(EmailError::Rejected(format!("mailbox {} unavailable", reject)));
            }
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}
