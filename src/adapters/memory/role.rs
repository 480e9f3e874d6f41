//! In-memory roles and dynamic role mappings.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, DynamicRoleId, ErrorCode, RoleId};
use crate::domain::role::{DynamicRole, Role};
use crate::ports::{DynamicRoleRepository, RoleReader};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleReader {
    roles: Arc<RwLock<Vec<Role>>>,
}

impl InMemoryRoleReader {
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(RwLock::new(roles)),
        }
    }

    async fn title_of(&self, id: &RoleId) -> Option<String> {
        self.roles
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.title.clone())
    }
}

#[async_trait]
impl RoleReader for InMemoryRoleReader {
    async fn find_by_title(&self, title: &str) -> Result<Option<Role>, DomainError> {
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .find(|r| r.title == title)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        let mut roles = self.roles.read().await.clone();
        roles.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(roles)
    }
}

/// Mappings keyed by id. Role titles are resolved through the role reader.
#[derive(Debug, Clone)]
pub struct InMemoryDynamicRoleRepository {
    roles: Arc<InMemoryRoleReader>,
    mappings: Arc<RwLock<HashMap<DynamicRoleId, DynamicRole>>>,
}

impl InMemoryDynamicRoleRepository {
    pub fn new(roles: Arc<InMemoryRoleReader>) -> Self {
        Self {
            roles,
            mappings: Arc::default(),
        }
    }
}

#[async_trait]
impl DynamicRoleRepository for InMemoryDynamicRoleRepository {
    async fn save(&self, mapping: &DynamicRole) -> Result<(), DomainError> {
        self.mappings
            .write()
            .await
            .insert(mapping.id, mapping.clone());
        Ok(())
    }

    async fn update(&self, mapping: &DynamicRole) -> Result<(), DomainError> {
        let mut mappings = self.mappings.write().await;
        match mappings.get_mut(&mapping.id) {
            Some(existing) => {
                *existing = mapping.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotFound,
                format!("dynamic role {} not found", mapping.id),
            )),
        }
    }

    async fn delete(&self, id: &DynamicRoleId) -> Result<(), DomainError> {
        self.mappings.write().await.remove(id);
        Ok(())
    }

    async fn exists(&self, role_type: &str, role_id: &RoleId) -> Result<bool, DomainError> {
        Ok(self
            .mappings
            .read()
            .await
            .values()
            .any(|m| m.role_type == role_type && &m.role_id == role_id))
    }

    async fn find_by_type_and_title(
        &self,
        role_type: &str,
        role_title: &str,
    ) -> Result<Option<DynamicRole>, DomainError> {
        let candidates: Vec<DynamicRole> = self
            .mappings
            .read()
            .await
            .values()
            .filter(|m| m.role_type == role_type)
            .cloned()
            .collect();
        for mapping in candidates {
            if self.roles.title_of(&mapping.role_id).await.as_deref() == Some(role_title) {
                return Ok(Some(mapping));
            }
        }
        Ok(None)
    }

    async fn list_types(&self) -> Result<Vec<String>, DomainError> {
        let types: BTreeSet<String> = self
            .mappings
            .read()
            .await
            .values()
            .map(|m| m.role_type.clone())
            .collect();
        Ok(types.into_iter().collect())
    }
}
