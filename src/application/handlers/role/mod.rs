//! Dynamic role command and query handlers.

mod create_dynamic_role;
mod delete_dynamic_role;
mod list_dynamic_roles;
mod update_dynamic_role;

pub use create_dynamic_role::{
    CreateDynamicRoleCommand, CreateDynamicRoleHandler, CreateDynamicRoleResult,
};
pub use delete_dynamic_role::{DeleteDynamicRoleCommand, DeleteDynamicRoleHandler};
pub use list_dynamic_roles::ListDynamicRoleTypesHandler;
pub use update_dynamic_role::{UpdateDynamicRoleCommand, UpdateDynamicRoleHandler};
