//! CreateDynamicRoleHandler - Command handler for new dynamic role mappings.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::role::{DynamicRole, Role, RoleError};
use crate::ports::{DynamicRoleRepository, RoleReader};

/// Command to map a dynamic role type onto a role, by role title.
#[derive(Debug, Clone)]
pub struct CreateDynamicRoleCommand {
    pub actor: UserId,
    pub role_type: String,
    pub role_title: String,
}

#[derive(Debug, Clone)]
pub struct CreateDynamicRoleResult {
    pub mapping: DynamicRole,
    pub role: Role,
}

pub struct CreateDynamicRoleHandler {
    roles: Arc<dyn RoleReader>,
    repository: Arc<dyn DynamicRoleRepository>,
}

impl CreateDynamicRoleHandler {
    pub fn new(roles: Arc<dyn RoleReader>, repository: Arc<dyn DynamicRoleRepository>) -> Self {
        Self { roles, repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateDynamicRoleCommand,
    ) -> Result<CreateDynamicRoleResult, RoleError> {
        let role = self
            .roles
            .find_by_title(&cmd.role_title)
            .await?
            .ok_or_else(|| RoleError::RoleNotFound(cmd.role_title.clone()))?;

        let mapping = DynamicRole::create(cmd.role_type, role.id.clone(), cmd.actor, Timestamp::now())?;

        if self.repository.exists(&mapping.role_type, &role.id).await? {
            return Err(RoleError::AlreadyExists {
                role_type: mapping.role_type,
                role: role.title,
            });
        }

        self.repository.save(&mapping).await?;

        Ok(CreateDynamicRoleResult { mapping, role })
    }
}
