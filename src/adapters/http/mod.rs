//! HTTP adapters - REST API implementations.
//!
//! Each module has its own HTTP adapter; `app` stitches them together.
//! Every response body uses the envelope in `envelope`.

pub mod app;
pub mod envelope;
pub mod integration;
pub mod middleware;
pub mod register;
pub mod role;
pub mod voucher;

pub use app::{api_router, app_router, ApiStates};
pub use envelope::{ApiResponse, Envelope, EnvelopeJson};
pub use integration::{integration_routes, IntegrationAppState};
pub use middleware::{auth_middleware, AuthState};
pub use register::{register_routes, RegisterAppState};
pub use role::{role_routes, RoleAppState};
pub use voucher::{voucher_routes, VoucherAppState};
