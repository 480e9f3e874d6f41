//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token validation and password hashing
//! - `auth_service` - Client for the platform's external auth service
//! - `csv` - Voucher sheet parsing
//! - `email` - Outbound email over the Resend API
//! - `http` - Axum routers, envelope and middleware
//! - `memory` - In-memory implementations for tests and local runs
//! - `postgres` - PostgreSQL repositories
//! - `voucher` - Voucher card rendering and delivery

pub mod auth;
pub mod auth_service;
pub mod csv;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod voucher;
