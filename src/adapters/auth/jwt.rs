//! HS256 platform token adapter.
//!
//! Access tokens issued by the platform auth service are HS256 JWTs signed
//! with the shared secret. This adapter implements the `SessionValidator`
//! port by:
//!
//! 1. Verifying the signature with the shared secret
//! 2. Validating the expiry claim
//! 3. Mapping `sub` and `roles` to the domain `AuthenticatedUser`

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by a platform access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Platform user id.
    pub sub: String,
    /// Role titles held by the user.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry as unix seconds.
    pub exp: i64,
}

/// Validates HS256 platform access tokens.
#[derive(Clone)]
pub struct JwtSessionValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(secret: &Secret<String>) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Signs claims with the shared secret. Used by local tooling and tests
    /// to mint tokens the service accepts.
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            tracing::warn!("Failed to sign access token: {}", e);
            AuthError::InvalidToken
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<AccessClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let id = UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, data.claims.roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn validator(secret: &str) -> JwtSessionValidator {
        JwtSessionValidator::new(&Secret::new(secret.to_string()))
    }

    fn claims(exp: i64) -> AccessClaims {
        AccessClaims {
            sub: "user-1".to_string(),
            roles: vec!["Admins".to_string()],
            exp,
        }
    }

    #[tokio::test]
    async fn valid_token_maps_to_authenticated_user() {
        let validator = validator("secret");
        let token = validator
            .sign(&claims(Timestamp::now().plus_secs(600).as_unix_secs()))
            .unwrap();

        let user = validator.validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
        assert!(user.has_any_role(&["Admins"]));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let validator = validator("secret");
        let token = validator
            .sign(&claims(Timestamp::now().as_unix_secs() - 3600))
            .unwrap();

        let result = validator.validate(&token).await;

        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn token_from_another_secret_is_invalid() {
        let token = validator("other")
            .sign(&claims(Timestamp::now().plus_secs(600).as_unix_secs()))
            .unwrap();

        let result = validator("secret").validate(&token).await;

        assert_eq!(result, Err(AuthError::InvalidToken));
    }
}
