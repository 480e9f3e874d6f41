//! Confirmation tokens handed to integration partners.
//!
//! A confirmation token is an HS256 JWT carrying an `authorization_id` and an
//! `exp` claim. Expiry is checked against the caller-supplied clock so the
//! decision is deterministic in tests.

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::errors::IntegrationError;

/// One hour.
pub const DEFAULT_CONFIRMATION_TTL_SECS: u64 = 3600;

/// Claims carried by a confirmation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationClaims {
    pub authorization_id: String,
    /// Expiry as unix seconds.
    pub exp: i64,
}

/// Issues and verifies confirmation tokens with a shared signing secret.
#[derive(Clone)]
pub struct ConfirmationTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl ConfirmationTokens {
    pub fn new(secret: &Secret<String>, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Mints a token for `authorization_id` that expires `ttl_secs` after `now`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank id, `Signing` if encoding fails.
    pub fn issue(&self, authorization_id: &str, now: Timestamp) -> Result<String, IntegrationError> {
        let authorization_id = authorization_id.trim();
        if authorization_id.is_empty() {
            return Err(IntegrationError::validation(
                "authorization_id",
                "This field may not be blank.",
            ));
        }

        let claims = ConfirmationClaims {
            authorization_id: authorization_id.to_string(),
            exp: now.plus_secs(self.ttl_secs).as_unix_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| IntegrationError::Signing(e.to_string()))
    }

    /// Decodes a token and returns its authorization id if it is still valid.
    ///
    /// # Errors
    ///
    /// `TokenInvalidOrExpired` for a bad signature, malformed token, or an
    /// `exp` that is not strictly after `now`.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<String, IntegrationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let data = decode::<ConfirmationClaims>(token, &self.decoding, &validation)
            .map_err(|_| IntegrationError::TokenInvalidOrExpired)?;

        if now.as_unix_secs() >= data.claims.exp {
            return Err(IntegrationError::TokenInvalidOrExpired);
        }
        Ok(data.claims.authorization_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> ConfirmationTokens {
        ConfirmationTokens::new(&Secret::new(secret.to_string()), DEFAULT_CONFIRMATION_TTL_SECS)
    }

    #[test]
    fn issued_token_verifies_to_its_authorization_id() {
        let tokens = tokens("signing-secret");
        let now = Timestamp::from_unix_secs(1_700_000_000);

        let token = tokens.issue("auth-42", now).unwrap();
        let id = tokens.verify(&token, now.plus_secs(59 * 60)).unwrap();

        assert_eq!(id, "auth-42");
    }

    #[test]
    fn token_is_rejected_once_expired() {
        let tokens = tokens("signing-secret");
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let token = tokens.issue("auth-42", now).unwrap();

        let result = tokens.verify(&token, now.plus_secs(DEFAULT_CONFIRMATION_TTL_SECS));

        assert_eq!(result, Err(IntegrationError::TokenInvalidOrExpired));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let token = tokens("other-secret").issue("auth-42", now).unwrap();

        let result = tokens("signing-secret").verify(&token, now);

        assert_eq!(result, Err(IntegrationError::TokenInvalidOrExpired));
    }

    #[test]
    fn garbage_is_rejected() {
        let result = tokens("signing-secret").verify("not-a-jwt", Timestamp::now());
        assert_eq!(result, Err(IntegrationError::TokenInvalidOrExpired));
    }

    #[test]
    fn blank_authorization_id_is_rejected() {
        let result = tokens("signing-secret").issue("  ", Timestamp::now());
        assert!(matches!(result, Err(IntegrationError::Validation { .. })));
    }
}
