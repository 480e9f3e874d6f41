//! Axum router configuration for registration endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    learning_circle_user, list_colleges, list_communities, list_companies, list_countries,
    list_departments, list_districts, list_interest_groups, list_roles, list_states,
    location_countries, location_states, location_zones, register_user, verify_email,
    RegisterAppState,
};

/// Registration routes, mounted under `/api/v1`.
pub fn register_routes() -> Router<RegisterAppState> {
    Router::new()
        .route("/register/", post(register_user))
        .route("/register/lc/user-validation/", post(learning_circle_user))
        .route("/register/email-verification/", post(verify_email))
        .route("/register/role/list/", get(list_roles))
        .route("/register/department/list/", get(list_departments))
        .route("/register/country/list/", get(list_countries))
        .route("/register/state/list/", post(list_states))
        .route("/register/district/list/", post(list_districts))
        .route("/register/college/list/", post(list_colleges))
        .route("/register/company/list/", get(list_companies))
        .route("/register/community/list/", get(list_communities))
        .route("/register/area-of-interest/list/", get(list_interest_groups))
        .route("/register/location/country/", get(location_countries))
        .route("/register/location/state/", get(location_states))
        .route("/register/location/zone/", get(location_zones))
}
