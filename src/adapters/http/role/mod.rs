//! HTTP adapter for dynamic role endpoints.
//!
//! All four verbs share `/api/v1/dashboard/dynamic-role/`:
//! - `POST` - Map a type onto a role
//! - `GET` - Distinct mapped types
//! - `DELETE` - Remove a mapping
//! - `PATCH` - Point a mapping at another role

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{RoleApiError, RoleAppState};
pub use routes::role_routes;
