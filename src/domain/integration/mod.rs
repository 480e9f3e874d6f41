//! Third-party integrations.
//!
//! Integrations authenticate with a per-integration bearer token stored on
//! the platform. Once authenticated they can mint short-lived confirmation
//! tokens that carry an authorization id, and later verify them.

mod confirmation;
mod credentials;
mod errors;

pub use confirmation::{ConfirmationClaims, ConfirmationTokens, DEFAULT_CONFIRMATION_TTL_SECS};
pub use credentials::{bearer_token, Integration};
pub use errors::IntegrationError;
