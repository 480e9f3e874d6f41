//! Karma Portal - platform backend for karma vouchers and member sign-up.
//!
//! Administrators bulk-import karma vouchers from CSV uploads; each voucher
//! is emailed to its recipient as a rendered card and written to the
//! voucher log. The crate also manages dynamic role mappings, third-party
//! integration tokens and self-service registration.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
