//! Integration error types.

use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    /// Header missing, not a bearer token, or the token does not belong to
    /// the named integration.
    #[error("Invalid Authorization header")]
    InvalidAuthorizationHeader,

    #[error("Token invalid or expired")]
    TokenInvalidOrExpired,

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Message relayed from the external auth service.
    #[error("{0}")]
    AuthService(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl IntegrationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IntegrationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for IntegrationError {
    fn from(err: DomainError) -> Self {
        IntegrationError::Infrastructure(err.to_string())
    }
}
