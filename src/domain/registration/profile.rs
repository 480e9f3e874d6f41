//! Views of a registered user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::new_user::NewUser;

/// Access and refresh tokens from the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile returned after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    pub id: UserId,
    pub muid: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub role: Option<String>,
}

impl From<&NewUser> for UserDetail {
    fn from(user: &NewUser) -> Self {
        Self {
            id: user.id.clone(),
            muid: user.muid.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            mobile: user.mobile.clone(),
            gender: user.gender.clone(),
            dob: user.dob,
            role: user.role.clone(),
        }
    }
}

/// Learning-circle view of a user, looked up by muid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningCircleUser {
    pub id: UserId,
    #[serde(rename = "mu_id")]
    pub muid: String,
    /// First and last name run together, no separator.
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl LearningCircleUser {
    pub fn new(
        id: UserId,
        muid: String,
        first_name: &str,
        last_name: Option<&str>,
        email: String,
        phone: String,
    ) -> Self {
        Self {
            id,
            muid,
            name: format!("{}{}", first_name, last_name.unwrap_or("")),
            email,
            phone,
        }
    }
}
