//! DeleteDynamicRoleHandler - Command handler for removing a mapping.

use std::sync::Arc;

use crate::domain::role::RoleError;
use crate::ports::DynamicRoleRepository;

#[derive(Debug, Clone)]
pub struct DeleteDynamicRoleCommand {
    pub role_type: String,
    pub role_title: String,
}

pub struct DeleteDynamicRoleHandler {
    repository: Arc<dyn DynamicRoleRepository>,
}

impl DeleteDynamicRoleHandler {
    pub fn new(repository: Arc<dyn DynamicRoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteDynamicRoleCommand) -> Result<(), RoleError> {
        let mapping = self
            .repository
            .find_by_type_and_title(&cmd.role_type, &cmd.role_title)
            .await?
            .ok_or_else(|| RoleError::mapping_not_found(&cmd.role_type, &cmd.role_title))?;

        self.repository.delete(&mapping.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDynamicRoleRepository, InMemoryRoleReader};
    use crate::domain::foundation::{RoleId, Timestamp, UserId};
    use crate::domain::role::{DynamicRole, Role};

    fn repository() -> Arc<InMemoryDynamicRoleRepository> {
        let roles = Arc::new(InMemoryRoleReader::with_roles(vec![Role {
            id: RoleId::new("r-lead").unwrap(),
            title: "Campus Lead".to_string(),
            description: None,
        }]));
        Arc::new(InMemoryDynamicRoleRepository::new(roles))
    }

    fn command() -> DeleteDynamicRoleCommand {
        DeleteDynamicRoleCommand {
            role_type: "lc_approver".to_string(),
            role_title: "Campus Lead".to_string(),
        }
    }

    #[tokio::test]
    async fn deletes_existing_mapping() {
        let repository = repository();
        let mapping = DynamicRole::create(
            "lc_approver",
            RoleId::new("r-lead").unwrap(),
            UserId::new("admin").unwrap(),
            Timestamp::now(),
        )
        .unwrap();
        repository.save(&mapping).await.unwrap();
        let handler = DeleteDynamicRoleHandler::new(repository.clone());

        handler.handle(command()).await.unwrap();

        assert!(repository.list_types().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_mapping_is_reported() {
        let handler = DeleteDynamicRoleHandler::new(repository());

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "No such Dynamic Role of type lc_approver and role Campus Lead present"
        );
    }
}
