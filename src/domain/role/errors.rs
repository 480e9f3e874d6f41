//! Role-specific error types.

use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("Role does not exist")]
    RoleNotFound(String),

    #[error("No such Dynamic Role of type {role_type} and role {role} present")]
    MappingNotFound { role_type: String, role: String },

    #[error("Dynamic Role of type {role_type} and role {role} already exists")]
    AlreadyExists { role_type: String, role: String },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl RoleError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RoleError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn mapping_not_found(role_type: impl Into<String>, role: impl Into<String>) -> Self {
        RoleError::MappingNotFound {
            role_type: role_type.into(),
            role: role.into(),
        }
    }
}

impl From<DomainError> for RoleError {
    fn from(err: DomainError) -> Self {
        RoleError::Infrastructure(err.to_string())
    }
}
