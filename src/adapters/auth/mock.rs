//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! use karma_portal::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new()
//!     .with_admin("admin-token", "admin-1")
//!     .with_test_user("user-token", "user-1");
//!
//! let result = validator.validate("admin-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthenticatedUser, AuthError, UserId};
use crate::ports::SessionValidator;

/// Role title the mock grants to administrators.
pub const MOCK_ADMIN_ROLE: &str = "Admins";

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a token for a user with no roles.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user = AuthenticatedUser::new(UserId::new(user_id).unwrap(), Vec::new());
        self.with_user(token, user)
    }

    /// Adds a token for a user holding `MOCK_ADMIN_ROLE`.
    pub fn with_admin(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).unwrap(),
            vec![MOCK_ADMIN_ROLE.to_string()],
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
