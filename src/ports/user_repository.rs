//! Registered user persistence.

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::foundation::DomainError;
use crate::domain::registration::{LearningCircleUser, NewUser, RegistrationError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    async fn muid_exists(&self, muid: &str) -> Result<bool, DomainError>;

    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the email or muid was taken concurrently
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &NewUser) -> Result<(), DomainError>;

    async fn find_learning_circle_user(
        &self,
        muid: &str,
    ) -> Result<Option<LearningCircleUser>, DomainError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password into a self-describing string (algorithm, salt, hash).
    fn hash(&self, password: &Secret<String>) -> Result<String, RegistrationError>;

    /// Check a password against a stored hash.
    fn verify(&self, password: &Secret<String>, hash: &str) -> bool;
}
