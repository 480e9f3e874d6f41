//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `voucher` - Karma voucher import rows, enrichment and records
//! - `role` - Platform roles and dynamic role mappings
//! - `integration` - Integration credentials and confirmation tokens
//! - `registration` - Sign-up validation, muids and reference data

pub mod foundation;
pub mod integration;
pub mod registration;
pub mod role;
pub mod voucher;
