//! Resend implementation of `EmailSender`.
//!
//! Posts each message to `{base_url}/emails`. Attachments travel inline as
//! base64 strings.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::EmailConfig;
use crate::ports::{EmailError, EmailMessage, EmailSender};

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

pub struct ResendEmailSender {
    client: Client,
    api_key: Secret<String>,
    from: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ResendAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct ResendAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

impl ResendEmailSender {
    /// # Errors
    ///
    /// `Transport` if the HTTP client cannot be built.
    pub fn new(
        api_key: Secret<String>,
        from: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            from: from.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EmailConfig) -> Result<Self, EmailError> {
        Self::new(config.api_key(), config.from_header(), &config.api_base_url)
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }

    fn payload<'a>(&'a self, message: &'a EmailMessage) -> Result<ResendPayload<'a>, EmailError> {
        if message.to.is_empty() {
            return Err(EmailError::Content("message has no recipients".to_string()));
        }

        Ok(ResendPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
            attachments: message
                .attachments
                .iter()
                .map(|a| ResendAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                    content_type: &a.content_type,
                })
                .collect(),
        })
    }

    async fn check_status(response: Response) -> Result<(), EmailError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            400..=499 => Err(EmailError::Rejected(format!("{}: {}", status, body))),
            _ => Err(EmailError::Transport(format!("{}: {}", status, body))),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let payload = self.payload(message)?;

        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(to = ?message.to, error = %e, "Email request failed");
                EmailError::Transport(e.to_string())
            })?;

        if let Err(err) = Self::check_status(response).await {
            warn!(to = ?message.to, error = %err, "Email provider refused message");
            return Err(err);
        }

        debug!(
            to = ?message.to,
            subject = %message.subject,
            attachments = message.attachments.len(),
            "Email sent"
        );
        Ok(())
    }
}
