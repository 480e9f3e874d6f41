//! Role and dynamic role persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, DynamicRoleId, RoleId};
use crate::domain::role::{DynamicRole, Role};

/// Read access to platform roles.
#[async_trait]
pub trait RoleReader: Send + Sync {
    /// Find a role by its exact title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Role>, DomainError>;

    /// All roles, ordered by title.
    async fn list(&self) -> Result<Vec<Role>, DomainError>;
}

/// Repository port for dynamic role mappings.
#[async_trait]
pub trait DynamicRoleRepository: Send + Sync {
    /// Save a new mapping.
    async fn save(&self, mapping: &DynamicRole) -> Result<(), DomainError>;

    /// Persist a changed mapping.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the mapping no longer exists
    async fn update(&self, mapping: &DynamicRole) -> Result<(), DomainError>;

    /// Delete a mapping by id.
    async fn delete(&self, id: &DynamicRoleId) -> Result<(), DomainError>;

    /// True if `role_type` already maps to `role_id`.
    async fn exists(&self, role_type: &str, role_id: &RoleId) -> Result<bool, DomainError>;

    /// The mapping of `role_type` onto the role titled `role_title`, if any.
    async fn find_by_type_and_title(
        &self,
        role_type: &str,
        role_title: &str,
    ) -> Result<Option<DynamicRole>, DomainError>;

    /// Distinct mapping types, sorted.
    async fn list_types(&self) -> Result<Vec<String>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ports_are_object_safe() {
        fn _reader(_: &dyn RoleReader) {}
        fn _repo(_: &dyn DynamicRoleRepository) {}
    }
}
