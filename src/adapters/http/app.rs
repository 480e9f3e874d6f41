//! Top-level router.
//!
//! ```text
//! /health
//! /api/v1/dashboard/karma-voucher/...   admin, session required
//! /api/v1/dashboard/dynamic-role/       session required
//! /api/v1/integrations/:name/...        integration bearer token
//! /api/v1/register/...                  public
//! ```

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::envelope::ApiResponse;
use super::integration::{integration_routes, IntegrationAppState};
use super::middleware::{auth_middleware, AuthState};
use super::register::{register_routes, RegisterAppState};
use super::role::{role_routes, RoleAppState};
use super::voucher::{voucher_routes, VoucherAppState};

/// State for every module router.
#[derive(Clone)]
pub struct ApiStates {
    pub voucher: VoucherAppState,
    pub role: RoleAppState,
    pub integration: IntegrationAppState,
    pub register: RegisterAppState,
}

/// Routes without the outer tower layers.
pub fn api_router(states: ApiStates, auth: AuthState) -> Router {
    let dashboard = Router::new()
        .merge(voucher_routes().with_state(states.voucher))
        .merge(role_routes().with_state(states.role))
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/dashboard", dashboard)
        .nest(
            "/api/v1/integrations",
            integration_routes().with_state(states.integration),
        )
        .nest("/api/v1", register_routes().with_state(states.register))
}

/// The full application: routes plus tracing, CORS and request timeout.
pub fn app_router(states: ApiStates, auth: AuthState, server: &ServerConfig) -> Router {
    api_router(states, auth)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Allows the configured origins, or any origin outside production when
/// none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if !origins.is_empty() {
        layer.allow_origin(origins)
    } else if server.is_production() {
        layer
    } else {
        layer.allow_origin(Any)
    }
}

async fn health() -> ApiResponse {
    ApiResponse::success(json!({"status": "ok"}))
}
