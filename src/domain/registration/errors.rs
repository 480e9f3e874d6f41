//! Registration error types.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Per-field messages keyed by field name.
    #[error("Invalid fields")]
    InvalidFields(BTreeMap<String, Vec<String>>),

    #[error("This email already exists")]
    EmailTaken,

    #[error("Invalid muid")]
    InvalidMuid,

    #[error("Could not allocate a muid for {0}")]
    MuidExhausted(String),

    /// Message relayed from the external auth service.
    #[error("{0}")]
    AuthService(String),

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::Infrastructure(err.to_string())
    }
}
