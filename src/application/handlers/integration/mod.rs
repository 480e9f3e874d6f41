//! Integration handlers.

mod authorize_integration;
mod confirmation_token;
mod exchange_access_token;

pub use authorize_integration::AuthorizeIntegrationHandler;
pub use confirmation_token::{IssueConfirmationTokenHandler, VerifyConfirmationTokenHandler};
pub use exchange_access_token::{AccessTokenGrant, ExchangeAccessTokenHandler};
