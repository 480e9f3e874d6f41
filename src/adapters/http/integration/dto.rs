//! Request and response shapes for integration endpoints.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::application::handlers::integration::AccessTokenGrant;
use crate::domain::integration::IntegrationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationTokenRequest {
    pub authorization_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationTokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyTokenResponse {
    pub authorization_id: String,
}

/// Either user credentials or an existing platform token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenRequest {
    pub email_or_muid: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl TryFrom<AccessTokenRequest> for AccessTokenGrant {
    type Error = IntegrationError;

    /// Credentials win when either credential field is present.
    fn try_from(request: AccessTokenRequest) -> Result<Self, Self::Error> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let email_or_muid = non_blank(request.email_or_muid);
        let password = non_blank(request.password);

        if email_or_muid.is_some() || password.is_some() {
            let email_or_muid = email_or_muid
                .ok_or_else(|| IntegrationError::validation("emailOrMuid", "This field is required."))?;
            let password = password
                .ok_or_else(|| IntegrationError::validation("password", "This field is required."))?;
            return Ok(AccessTokenGrant::Credentials {
                email_or_muid,
                password: Secret::new(password),
            });
        }

        non_blank(request.token)
            .map(AccessTokenGrant::Token)
            .ok_or_else(|| IntegrationError::validation("token", "This field is required."))
    }
}
