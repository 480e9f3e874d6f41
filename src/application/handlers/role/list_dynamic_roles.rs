//! ListDynamicRoleTypesHandler - Query handler for distinct mapping types.

use std::sync::Arc;

use crate::domain::role::RoleError;
use crate::ports::DynamicRoleRepository;

pub struct ListDynamicRoleTypesHandler {
    repository: Arc<dyn DynamicRoleRepository>,
}

impl ListDynamicRoleTypesHandler {
    pub fn new(repository: Arc<dyn DynamicRoleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<String>, RoleError> {
        Ok(self.repository.list_types().await?)
    }
}
