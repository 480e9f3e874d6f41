//! External auth service port.
//!
//! The platform's auth service owns access and refresh tokens. This service
//! only exchanges credentials (or an existing token) for a token pair.

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::registration::TokenPair;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthServiceError {
    /// The auth service answered with a non-200 status code. Carries its
    /// first general message.
    #[error("{0}")]
    Rejected(String),

    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AuthServiceClient: Send + Sync {
    /// Exchange an email or muid and password for a token pair.
    async fn authenticate(
        &self,
        email_or_muid: &str,
        password: &Secret<String>,
    ) -> Result<TokenPair, AuthServiceError>;

    /// Exchange an existing token for a fresh token pair.
    async fn verify_token(&self, token: &str) -> Result<TokenPair, AuthServiceError>;
}
