//! RegisterUserHandler - Command handler for self-service sign-up.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::registration::{
    muid_candidates, NewRegistration, NewUser, RegistrationError, TokenPair, UserDetail,
};
use crate::ports::{
    AuthServiceClient, AuthServiceError, EmailMessage, EmailSender, PasswordHasher, UserRepository,
};

pub const WELCOME_SUBJECT: &str = "YOUR TICKET TO µFAM IS HERE!";

#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub tokens: TokenPair,
    pub user: UserDetail,
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    auth_service: Arc<dyn AuthServiceClient>,
    email: Arc<dyn EmailSender>,
}

impl RegisterUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        auth_service: Arc<dyn AuthServiceClient>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            users,
            hasher,
            auth_service,
            email,
        }
    }

    /// Validates, stores the user, signs them in and sends the welcome mail.
    ///
    /// # Errors
    ///
    /// - `InvalidFields` when any field fails validation
    /// - `EmailTaken` when the email is already registered
    /// - `AuthService` when the auth service refuses the new credentials
    pub async fn handle(
        &self,
        registration: NewRegistration,
    ) -> Result<RegisterUserResult, RegistrationError> {
        let registration = registration.normalized();
        registration.validate()?;

        if self.users.email_exists(&registration.email).await? {
            return Err(RegistrationError::EmailTaken);
        }

        let muid = self
            .allocate_muid(&registration.first_name, registration.last_name.as_deref())
            .await?;
        let password = registration.password.clone();
        let password_hash = self.hasher.hash(&password)?;
        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|e| RegistrationError::Infrastructure(e.to_string()))?;

        let user = registration.into_user(id, muid, password_hash, Timestamp::now());
        self.users.save(&user).await?;
        info!(user_id = %user.id, muid = %user.muid, "User registered");

        let tokens = self
            .auth_service
            .authenticate(&user.muid, &password)
            .await
            .map_err(|err| match err {
                AuthServiceError::Rejected(message) => RegistrationError::AuthService(message),
                AuthServiceError::Unavailable(reason) => RegistrationError::Infrastructure(reason),
            })?;

        if let Err(err) = self.email.send(&welcome_email(&user)).await {
            warn!(user_id = %user.id, error = %err, "Welcome email not sent");
        }

        Ok(RegisterUserResult {
            tokens,
            user: UserDetail::from(&user),
        })
    }

    async fn allocate_muid(
        &self,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Result<String, RegistrationError> {
        for candidate in muid_candidates(first_name, last_name) {
            if !self.users.muid_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(RegistrationError::MuidExhausted(first_name.to_string()))
    }
}

fn welcome_email(user: &NewUser) -> EmailMessage {
    let name = match &user.last_name {
        Some(last) => format!("{} {}", user.first_name, last),
        None => user.first_name.clone(),
    };
    let text = format!(
        "Hi {},\n\n\
         Welcome aboard! Your account is ready.\n\n\
         Your muid is {}. Use it, or your email address, to sign in.\n\n\
         See you in the community!",
        name, user.muid
    );
    EmailMessage::new(user.email.clone(), WELCOME_SUBJECT, text)
}
