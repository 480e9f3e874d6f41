//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, auth types, pagination and error types
//! that form the vocabulary of the rest of the domain.

mod auth;
mod errors;
mod ids;
mod page;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DynamicRoleId, RoleId, TaskId, UserId, VoucherId};
pub use page::{Page, PageRequest, Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use timestamp::Timestamp;
