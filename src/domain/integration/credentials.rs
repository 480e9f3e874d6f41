//! Integration credentials and bearer header parsing.

use subtle::ConstantTimeEq;

use super::errors::IntegrationError;

/// A registered integration and its shared bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub name: String,
    pub token: String,
}

impl Integration {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
        }
    }

    /// Compares a presented token with the stored one in constant time.
    pub fn accepts(&self, presented: &str) -> bool {
        let stored = self.token.as_bytes();
        let presented = presented.as_bytes();
        stored.len() == presented.len() && bool::from(stored.ct_eq(presented))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// # Errors
///
/// `InvalidAuthorizationHeader` if the header is absent, uses another
/// scheme, or carries an empty token.
pub fn bearer_token(header: Option<&str>) -> Result<&str, IntegrationError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(IntegrationError::InvalidAuthorizationHeader)?;

    if token.is_empty() {
        return Err(IntegrationError::InvalidAuthorizationHeader);
    }
    Ok(token)
}
