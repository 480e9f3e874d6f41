//! Argon2id password hashing.

use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use secrecy::{ExposeSecret, Secret};

use crate::domain::registration::RegistrationError;
use crate::ports::PasswordHasher;

/// Hashes with Argon2id and default parameters. Output is a PHC string.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Secret<String>) -> Result<String, RegistrationError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| RegistrationError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &Secret<String>, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.expose_secret().as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
