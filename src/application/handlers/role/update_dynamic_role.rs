//! UpdateDynamicRoleHandler - Command handler for re-pointing a mapping.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::role::{DynamicRole, RoleError};
use crate::ports::{DynamicRoleRepository, RoleReader};

#[derive(Debug, Clone)]
pub struct UpdateDynamicRoleCommand {
    pub actor: UserId,
    pub role_type: String,
    pub role_title: String,
    pub new_role_title: String,
}

pub struct UpdateDynamicRoleHandler {
    roles: Arc<dyn RoleReader>,
    repository: Arc<dyn DynamicRoleRepository>,
}

impl UpdateDynamicRoleHandler {
    pub fn new(roles: Arc<dyn RoleReader>, repository: Arc<dyn DynamicRoleRepository>) -> Self {
        Self { roles, repository }
    }

    pub async fn handle(&self, cmd: UpdateDynamicRoleCommand) -> Result<DynamicRole, RoleError> {
        let mut mapping = self
            .repository
            .find_by_type_and_title(&cmd.role_type, &cmd.role_title)
            .await?
            .ok_or_else(|| RoleError::mapping_not_found(&cmd.role_type, &cmd.role_title))?;

        let new_role = self
            .roles
            .find_by_title(&cmd.new_role_title)
            .await?
            .ok_or(RoleError::RoleNotFound(cmd.new_role_title))?;

        mapping.reassign(new_role.id, cmd.actor, Timestamp::now());
        self.repository.update(&mapping).await?;

        Ok(mapping)
    }
}
