//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod integration;
pub mod registration;
pub mod role;
pub mod voucher;

pub use integration::{
    AccessTokenGrant, AuthorizeIntegrationHandler, ExchangeAccessTokenHandler,
    IssueConfirmationTokenHandler, VerifyConfirmationTokenHandler,
};
pub use registration::{
    CheckEmailHandler, CollegeListing, LearningCircleUserHandler, LocationLookup,
    ReferenceDataHandler, RegisterUserHandler, RegisterUserResult,
};
pub use role::{
    CreateDynamicRoleCommand, CreateDynamicRoleHandler, CreateDynamicRoleResult,
    DeleteDynamicRoleCommand, DeleteDynamicRoleHandler, ListDynamicRoleTypesHandler,
    UpdateDynamicRoleCommand, UpdateDynamicRoleHandler,
};
pub use voucher::{
    ImportVouchersCommand, ImportVouchersHandler, ImportVouchersResult, ListVouchersHandler,
    ListVouchersQuery,
};
