//! reqwest implementation of `AuthServiceClient`.
//!
//! The auth service answers every call with the platform envelope. Anything
//! other than `statusCode == 200` is a rejection carrying the first general
//! message.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::domain::registration::TokenPair;
use crate::ports::{AuthServiceClient, AuthServiceError};

pub struct HttpAuthServiceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<EnvelopeMessage>,
    #[serde(default)]
    response: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct EnvelopeMessage {
    #[serde(default)]
    general: Vec<String>,
}

impl Envelope {
    fn into_tokens(self) -> Result<TokenPair, AuthServiceError> {
        if self.status_code != Some(200) {
            let message = self
                .message
                .and_then(|m| m.general.into_iter().next())
                .unwrap_or_else(|| "Authentication failed".to_string());
            return Err(AuthServiceError::Rejected(message));
        }
        self.response
            .and_then(|value| serde_json::from_value(value).ok())
            .ok_or_else(|| {
                AuthServiceError::Unavailable("auth service returned no tokens".to_string())
            })
    }
}

impl HttpAuthServiceClient {
    /// # Errors
    ///
    /// `Unavailable` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthServiceError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn authentication_url(&self) -> String {
        format!("{}/api/v1/auth/user-authentication/", self.base_url)
    }

    fn verification_url(&self, token: &str) -> String {
        format!("{}/api/v1/auth/token-verification/{}/", self.base_url, token)
    }

    async fn read(response: reqwest::Response) -> Result<TokenPair, AuthServiceError> {
        let envelope: Envelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Auth service returned an unreadable body");
            AuthServiceError::Unavailable(e.to_string())
        })?;
        envelope.into_tokens()
    }
}

#[async_trait]
impl AuthServiceClient for HttpAuthServiceClient {
    async fn authenticate(
        &self,
        email_or_muid: &str,
        password: &Secret<String>,
    ) -> Result<TokenPair, AuthServiceError> {
        let response = self
            .client
            .post(self.authentication_url())
            .form(&[
                ("emailOrMuid", email_or_muid),
                ("password", password.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Auth service unreachable");
                AuthServiceError::Unavailable(e.to_string())
            })?;

        Self::read(response).await
    }

    async fn verify_token(&self, token: &str) -> Result<TokenPair, AuthServiceError> {
        let response = self
            .client
            .post(self.verification_url(token))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Auth service unreachable");
                AuthServiceError::Unavailable(e.to_string())
            })?;

        Self::read(response).await
    }
}
