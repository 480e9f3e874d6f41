//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `KARMA_PORTAL` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use karma_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, environment and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL pool
    pub database: DatabaseConfig,

    /// Token signing and the external auth service
    pub auth: AuthConfig,

    /// Outbound email (Resend)
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `KARMA_PORTAL__*` variables:
    ///
    /// - `KARMA_PORTAL__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `KARMA_PORTAL__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KARMA_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.email.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
