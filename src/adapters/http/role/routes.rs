//! Axum router configuration for dynamic role endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_dynamic_role, delete_dynamic_role, list_dynamic_role_types, update_dynamic_role,
    RoleAppState,
};

/// Dynamic role routes, mounted under `/api/v1/dashboard`.
///
/// Every verb requires an authenticated user.
pub fn role_routes() -> Router<RoleAppState> {
    Router::new().route(
        "/dynamic-role/",
        get(list_dynamic_role_types)
            .post(create_dynamic_role)
            .delete(delete_dynamic_role)
            .patch(update_dynamic_role),
    )
}
