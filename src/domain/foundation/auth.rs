//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the HTTP layer knows about the caller after
//! a bearer token has been validated. Any token issuer can populate it via the
//! `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The platform user identifier (token subject).
    pub id: UserId,

    /// Role titles granted to the user.
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, roles: Vec<String>) -> Self {
        Self { id, roles }
    }

    /// Returns true if the user holds any of the given role titles.
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        self.roles
            .iter()
            .any(|role| required.iter().any(|r| r == role))
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// User exists but lacks required permissions for this action.
    #[error("You do not have the required role to access this page")]
    InsufficientPermissions,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-1").unwrap(),
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn has_any_role_matches_exact_titles() {
        let user = user_with_roles(&["Admins", "Student"]);
        assert!(user.has_any_role(&["Admins"]));
        assert!(!user.has_any_role(&["admins"]));
        assert!(!user.has_any_role(&[]));
    }

    #[test]
    fn expired_token_requires_reauthentication() {
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
    }
}
