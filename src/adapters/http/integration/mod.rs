//! HTTP adapter for third-party integration endpoints.
//!
//! Every route is guarded by the integration's own bearer token:
//! - `POST /api/v1/integrations/:name/confirmation-token/`
//! - `POST /api/v1/integrations/:name/verify-token/`
//! - `POST /api/v1/integrations/:name/access-token/`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{IntegrationApiError, IntegrationAppState};
pub use routes::integration_routes;
