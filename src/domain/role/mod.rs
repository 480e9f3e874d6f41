//! Roles and dynamic role mappings.
//!
//! A dynamic role maps a *type* (a named slot such as a campus lead or a
//! mentor approver) onto one of the platform roles. Other parts of the
//! platform resolve the slot at runtime instead of hard-coding role titles.

mod dynamic_role;
mod errors;

pub use dynamic_role::{DynamicRole, Role};
pub use errors::RoleError;
