//! PostgreSQL adapters - Database implementations for the repository ports.
//!
//! - `PostgresUserDirectory`, `PostgresTaskCatalog` - bulk import lookups
//! - `PostgresVoucherRepository` - voucher log writes and the admin listing
//! - `PostgresRoleReader`, `PostgresDynamicRoleRepository` - roles
//! - `PostgresIntegrationRepository` - integration credentials
//! - `PostgresUserRepository`, `PostgresReferenceData` - registration

mod integration_repository;
mod reference_data;
mod role_repository;
mod user_repository;
mod voucher_lookup;
mod voucher_repository;

pub use integration_repository::PostgresIntegrationRepository;
pub use reference_data::PostgresReferenceData;
pub use role_repository::{PostgresDynamicRoleRepository, PostgresRoleReader};
pub use user_repository::PostgresUserRepository;
pub use voucher_lookup::{PostgresTaskCatalog, PostgresUserDirectory};
pub use voucher_repository::PostgresVoucherRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a driver error with what was being attempted.
fn database_error(action: &str, err: sqlx::Error) -> DomainError {
    tracing::warn!(action, error = %err, "Database operation failed");
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}

/// Unique-constraint violations surface as `AlreadyExists`.
fn write_error(action: &str, err: sqlx::Error) -> DomainError {
    let unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique {
        return DomainError::new(ErrorCode::AlreadyExists, format!("Failed to {}: duplicate", action));
    }
    database_error(action, err)
}

/// A stored identifier failed domain validation.
fn corrupt_row(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("Invalid stored row: {}", err))
}
