//! Session validation port for bearer token validation.
//!
//! HTTP middleware uses this to turn an `Authorization: Bearer` header into
//! an `AuthenticatedUser`. Implementations exist for HS256 platform tokens and
//! for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthenticatedUser, AuthError};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate the expiry claim
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_user_for_known_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "valid-token",
            AuthenticatedUser::new(UserId::new("user-123").unwrap(), vec!["Admins".to_string()]),
        );

        let user = validator.validate("valid-token").await.unwrap();

        assert_eq!(user.id.as_str(), "user-123");
        assert!(user.has_any_role(&["Admins"]));
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let validator = TestSessionValidator::new();
        let result = validator.validate("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
