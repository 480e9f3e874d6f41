//! Authentication configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest signing secret accepted outside development.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared by access tokens and confirmation tokens
    pub jwt_secret: String,

    /// Base URL of the external auth service
    pub auth_domain: String,

    /// Role title that grants access to the admin dashboard
    #[serde(default = "default_admin_role")]
    pub admin_role: String,

    /// Lifetime of integration confirmation tokens in seconds
    #[serde(default = "default_confirmation_ttl")]
    pub confirmation_token_ttl_secs: u64,

    /// Outbound request timeout for the auth service in seconds
    #[serde(default = "default_auth_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    /// The signing secret, wrapped for handing to adapters.
    pub fn signing_secret(&self) -> Secret<String> {
        Secret::new(self.jwt_secret.clone())
    }

    /// Auth service base URL without a trailing slash.
    pub fn auth_base_url(&self) -> &str {
        self.auth_domain.trim_end_matches('/')
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the auth service and a long secret.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if self.auth_domain.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_DOMAIN"));
        }
        if self.confirmation_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }

        if *environment == Environment::Production {
            if !self.auth_domain.starts_with("https://") {
                return Err(ValidationError::AuthorityMustBeHttps);
            }
            if self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::WeakJwtSecret);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            auth_domain: String::new(),
            admin_role: default_admin_role(),
            confirmation_token_ttl_secs: default_confirmation_ttl(),
            request_timeout_secs: default_auth_timeout(),
        }
    }
}

fn default_admin_role() -> String {
    "Admins".to_string()
}

fn default_confirmation_ttl() -> u64 {
    3600
}

fn default_auth_timeout() -> u64 {
    10
}
