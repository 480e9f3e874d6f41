//! Voucher import error types.
//!
//! Structural errors reject the whole upload before any row is looked at.
//! Row errors are collected next to the successes and returned to the caller.

use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherImportError {
    #[error("File not found.")]
    MissingFile,

    #[error("Empty csv file.")]
    EmptyFile,

    #[error("{0} does not exist in the file.")]
    MissingColumn(String),

    #[error("Could not read csv file: {0}")]
    MalformedFile(String),

    #[error("Invalid email: {0}")]
    InvalidUser(String),

    #[error("Invalid task hashtag: {0}")]
    InvalidTask(String),

    #[error("Invalid karma: {0}")]
    InvalidKarma(String),

    #[error("Karma cannot be 0")]
    ZeroReward,

    #[error("Invalid {field}: {reason}")]
    SchemaInvalid { field: String, reason: String },

    #[error("Failed to send voucher email: {0}")]
    EmailDispatchFailed(String),

    #[error("Failed to save voucher: {0}")]
    PersistenceFailed(String),

    /// Bulk lookups failed; nothing was processed.
    #[error("Voucher import unavailable: {0}")]
    Infrastructure(String),
}

impl VoucherImportError {
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VoucherImportError::SchemaInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for VoucherImportError {
    fn from(err: DomainError) -> Self {
        VoucherImportError::Infrastructure(err.to_string())
    }
}
