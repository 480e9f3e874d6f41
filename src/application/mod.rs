//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Voucher handlers
    ImportVouchersCommand, ImportVouchersHandler, ImportVouchersResult,
    ListVouchersHandler, ListVouchersQuery,
    // Dynamic role handlers
    CreateDynamicRoleCommand, CreateDynamicRoleHandler, DeleteDynamicRoleCommand,
    DeleteDynamicRoleHandler, ListDynamicRoleTypesHandler, UpdateDynamicRoleCommand,
    UpdateDynamicRoleHandler,
};
