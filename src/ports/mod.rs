//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Voucher Ports
//!
//! - `UserDirectory`, `TaskCatalog` - bulk reference lookups for an import
//! - `VoucherRepository` - voucher log writes
//! - `VoucherReader` - admin listing
//! - `VoucherRenderer`, `VoucherNotifier` - card rendering and delivery
//!
//! ## Platform Ports
//!
//! - `EmailSender` - outbound email
//! - `SessionValidator` - bearer token validation
//! - `AuthServiceClient` - token exchange with the external auth service
//! - `RoleReader`, `DynamicRoleRepository` - roles and dynamic mappings
//! - `IntegrationRepository` - integration credentials
//! - `UserRepository`, `PasswordHasher`, `ReferenceDataReader` - registration

mod auth_service;
mod email_sender;
mod integration_repository;
mod reference_data;
mod role_repository;
mod session_validator;
mod user_repository;
mod voucher_lookup;
mod voucher_notifier;
mod voucher_repository;

pub use auth_service::{AuthServiceClient, AuthServiceError};
pub use email_sender::{EmailAttachment, EmailError, EmailMessage, EmailSender};
pub use integration_repository::IntegrationRepository;
pub use reference_data::ReferenceDataReader;
pub use role_repository::{DynamicRoleRepository, RoleReader};
pub use session_validator::SessionValidator;
pub use user_repository::{PasswordHasher, UserRepository};
pub use voucher_lookup::{TaskCatalog, UserDirectory};
pub use voucher_notifier::{NotifyError, VoucherCard, VoucherNotifier, VoucherRenderer};
pub use voucher_repository::{VoucherReader, VoucherRepository};
