//! In-memory adapters.
//!
//! Every port has an in-memory implementation for tests and local
//! development. State lives behind `tokio::sync::RwLock` and is lost on drop.

mod email;
mod integration;
mod registration;
mod role;
mod voucher;

pub use email::RecordingEmailSender;
pub use integration::{InMemoryIntegrationRepository, StubAuthService};
pub use registration::{InMemoryReferenceData, InMemoryUserRepository};
pub use role::{InMemoryDynamicRoleRepository, InMemoryRoleReader};
pub use voucher::{InMemoryTaskCatalog, InMemoryUserDirectory, InMemoryVoucherRepository};
