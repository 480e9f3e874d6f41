//! Request and response shapes for dynamic role endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::role::CreateDynamicRoleResult;
use crate::domain::foundation::{DynamicRoleId, RoleId};

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicRoleRequest {
    #[serde(rename = "type")]
    pub role_type: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReassignDynamicRoleRequest {
    #[serde(rename = "type")]
    pub role_type: String,
    pub role: String,
    pub new_role: String,
}

/// A mapped type, as listed and as echoed after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicRoleTypeResponse {
    #[serde(rename = "type")]
    pub role_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DynamicRoleCreatedResponse {
    pub id: DynamicRoleId,
    #[serde(rename = "type")]
    pub role_type: String,
    pub role: RoleId,
}

impl From<CreateDynamicRoleResult> for DynamicRoleCreatedResponse {
    fn from(result: CreateDynamicRoleResult) -> Self {
        Self {
            id: result.mapping.id,
            role_type: result.mapping.role_type,
            role: result.role.id,
        }
    }
}
