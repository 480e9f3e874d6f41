//! HTTP handlers for dynamic role endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::envelope::{ApiResponse, EnvelopeJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::role::{
    CreateDynamicRoleCommand, CreateDynamicRoleHandler, DeleteDynamicRoleCommand,
    DeleteDynamicRoleHandler, ListDynamicRoleTypesHandler, UpdateDynamicRoleCommand,
    UpdateDynamicRoleHandler,
};
use crate::domain::role::RoleError;
use crate::ports::{DynamicRoleRepository, RoleReader};

use super::dto::{
    DynamicRoleCreatedResponse, DynamicRoleRequest, DynamicRoleTypeResponse,
    ReassignDynamicRoleRequest,
};

#[derive(Clone)]
pub struct RoleAppState {
    pub roles: Arc<dyn RoleReader>,
    pub dynamic_roles: Arc<dyn DynamicRoleRepository>,
}

impl RoleAppState {
    pub fn create_handler(&self) -> CreateDynamicRoleHandler {
        CreateDynamicRoleHandler::new(self.roles.clone(), self.dynamic_roles.clone())
    }

    pub fn list_handler(&self) -> ListDynamicRoleTypesHandler {
        ListDynamicRoleTypesHandler::new(self.dynamic_roles.clone())
    }

    pub fn delete_handler(&self) -> DeleteDynamicRoleHandler {
        DeleteDynamicRoleHandler::new(self.dynamic_roles.clone())
    }

    pub fn update_handler(&self) -> UpdateDynamicRoleHandler {
        UpdateDynamicRoleHandler::new(self.roles.clone(), self.dynamic_roles.clone())
    }
}

/// POST /api/v1/dashboard/dynamic-role/
pub async fn create_dynamic_role(
    State(state): State<RoleAppState>,
    RequireAuth(user): RequireAuth,
    EnvelopeJson(request): EnvelopeJson<DynamicRoleRequest>,
) -> Result<impl IntoResponse, RoleApiError> {
    let cmd = CreateDynamicRoleCommand {
        actor: user.id,
        role_type: request.role_type,
        role_title: request.role,
    };
    let result = state.create_handler().handle(cmd).await?;

    Ok(ApiResponse::success(DynamicRoleCreatedResponse::from(result))
        .with_message("Dynamic Role created successfully"))
}

/// GET /api/v1/dashboard/dynamic-role/
pub async fn list_dynamic_role_types(
    State(state): State<RoleAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, RoleApiError> {
    let types: Vec<DynamicRoleTypeResponse> = state
        .list_handler()
        .handle()
        .await?
        .into_iter()
        .map(|role_type| DynamicRoleTypeResponse { role_type })
        .collect();

    Ok(ApiResponse::success(types))
}

/// DELETE /api/v1/dashboard/dynamic-role/
pub async fn delete_dynamic_role(
    State(state): State<RoleAppState>,
    RequireAuth(_user): RequireAuth,
    EnvelopeJson(request): EnvelopeJson<DynamicRoleRequest>,
) -> Result<impl IntoResponse, RoleApiError> {
    let message = format!(
        "Dynamic Role of type {} and role {} deleted successfully",
        request.role_type, request.role
    );
    let cmd = DeleteDynamicRoleCommand {
        role_type: request.role_type,
        role_title: request.role,
    };
    state.delete_handler().handle(cmd).await?;

    Ok(ApiResponse::message(message))
}

/// PATCH /api/v1/dashboard/dynamic-role/
pub async fn update_dynamic_role(
    State(state): State<RoleAppState>,
    RequireAuth(user): RequireAuth,
    EnvelopeJson(request): EnvelopeJson<ReassignDynamicRoleRequest>,
) -> Result<impl IntoResponse, RoleApiError> {
    let message = format!(
        "Dynamic Role of type {} and role {} updated successfully",
        request.role_type, request.role
    );
    let cmd = UpdateDynamicRoleCommand {
        actor: user.id,
        role_type: request.role_type,
        role_title: request.role,
        new_role_title: request.new_role,
    };
    let updated = state.update_handler().handle(cmd).await?;

    Ok(ApiResponse::success(DynamicRoleTypeResponse {
        role_type: updated.role_type,
    })
    .with_message(message))
}

#[derive(Debug)]
pub struct RoleApiError(RoleError);

impl From<RoleError> for RoleApiError {
    fn from(err: RoleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RoleApiError {
    fn into_response(self) -> Response {
        match self.0 {
            RoleError::Validation { field, message } => {
                let mut fields = BTreeMap::new();
                fields.insert(field, vec![message]);
                ApiResponse::invalid_fields("Invalid fields", fields).into_response()
            }
            RoleError::Infrastructure(reason) => {
                tracing::error!(reason = %reason, "Dynamic role request failed");
                ApiResponse::internal().into_response()
            }
            err => ApiResponse::failure(err.to_string()).into_response(),
        }
    }
}
