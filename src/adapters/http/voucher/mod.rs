//! HTTP adapter for karma voucher endpoints.
//!
//! - `POST /api/v1/dashboard/karma-voucher/import/` - Bulk import from a CSV upload
//! - `GET /api/v1/dashboard/karma-voucher/` - Paginated voucher log

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{VoucherApiError, VoucherAppState};
pub use routes::voucher_routes;
