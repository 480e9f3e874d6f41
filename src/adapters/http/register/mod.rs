//! HTTP adapter for registration and sign-up reference data.
//!
//! Everything here is public; the learning-circle lookup identifies the user
//! by a `muid` header instead of a session.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{RegisterApiError, RegisterAppState};
pub use routes::register_routes;
