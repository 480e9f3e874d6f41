//! ExchangeAccessTokenHandler - obtains platform tokens on a partner's behalf.

use std::sync::Arc;

use secrecy::Secret;

use crate::domain::integration::IntegrationError;
use crate::domain::registration::TokenPair;
use crate::ports::{AuthServiceClient, AuthServiceError};

/// What the partner presents: user credentials or an existing token.
#[derive(Debug, Clone)]
pub enum AccessTokenGrant {
    Credentials {
        email_or_muid: String,
        password: Secret<String>,
    },
    Token(String),
}

pub struct ExchangeAccessTokenHandler {
    auth_service: Arc<dyn AuthServiceClient>,
}

impl ExchangeAccessTokenHandler {
    pub fn new(auth_service: Arc<dyn AuthServiceClient>) -> Self {
        Self { auth_service }
    }

    pub async fn handle(&self, grant: AccessTokenGrant) -> Result<TokenPair, IntegrationError> {
        let result = match &grant {
            AccessTokenGrant::Credentials {
                email_or_muid,
                password,
            } => self.auth_service.authenticate(email_or_muid, password).await,
            AccessTokenGrant::Token(token) => self.auth_service.verify_token(token).await,
        };

        result.map_err(|err| match err {
            AuthServiceError::Rejected(message) => IntegrationError::AuthService(message),
            AuthServiceError::Unavailable(reason) => IntegrationError::Infrastructure(reason),
        })
    }
}
