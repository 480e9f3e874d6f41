//! Client for the platform's external auth service.

mod http_client;

pub use http_client::HttpAuthServiceClient;
