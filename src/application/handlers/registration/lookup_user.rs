//! Lookups against registered users.

use std::sync::Arc;

use crate::domain::registration::{LearningCircleUser, RegistrationError};
use crate::ports::UserRepository;

/// Resolves a muid to the learning-circle view of that user.
pub struct LearningCircleUserHandler {
    users: Arc<dyn UserRepository>,
}

impl LearningCircleUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, muid: Option<&str>) -> Result<LearningCircleUser, RegistrationError> {
        let muid = muid
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(RegistrationError::InvalidMuid)?;

        self.users
            .find_learning_circle_user(muid)
            .await?
            .ok_or(RegistrationError::InvalidMuid)
    }
}

/// Reports whether an email address is already registered.
pub struct CheckEmailHandler {
    users: Arc<dyn UserRepository>,
}

impl CheckEmailHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, email: &str) -> Result<bool, RegistrationError> {
        Ok(self.users.email_exists(email.trim()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::registration::NewUser;
    use crate::ports::UserRepository as _;

    async fn users() -> Arc<InMemoryUserRepository> {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .save(&NewUser {
                id: UserId::new("u-1").unwrap(),
                muid: "asha-menon@karma".to_string(),
                first_name: "Asha".to_string(),
                last_name: Some("Menon".to_string()),
                email: "asha@example.com".to_string(),
                mobile: "9876543210".to_string(),
                gender: None,
                dob: None,
                password_hash: "$argon2id$x".to_string(),
                role: None,
                organizations: vec![],
                department: None,
                year_of_graduation: None,
                area_of_interests: vec![],
                created_at: Timestamp::now(),
            })
            .await
            .unwrap();
        users
    }

    #[tokio::test]
    async fn learning_circle_lookup_by_muid() {
        let handler = LearningCircleUserHandler::new(users().await);

        let user = handler.handle(Some("asha-menon@karma")).await.unwrap();

        assert_eq!(user.name, "AshaMenon");
        assert_eq!(user.phone, "9876543210");
    }

    #[tokio::test]
    async fn missing_or_unknown_muid_is_invalid() {
        let handler = LearningCircleUserHandler::new(users().await);

        assert_eq!(handler.handle(None).await.unwrap_err(), RegistrationError::InvalidMuid);
        assert_eq!(
            handler.handle(Some("ghost@karma")).await.unwrap_err(),
            RegistrationError::InvalidMuid
        );
    }

    #[tokio::test]
    async fn email_check_reports_presence() {
        let handler = CheckEmailHandler::new(users().await);

        assert!(handler.handle("asha@example.com").await.unwrap());
        assert!(!handler.handle("nobody@example.com").await.unwrap());
    }
}
