//! A submitted registration and the user record it becomes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{Timestamp, UserId};

use super::errors::RegistrationError;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 75;
const MUID_DOMAIN: &str = "karma";
const MAX_MUID_SUFFIX: u32 = 99;
const GENDERS: [&str; 3] = ["Male", "Female", "Others"];

/// Field-keyed validation messages collected in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), RegistrationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::InvalidFields(self.0))
        }
    }
}

/// What a visitor submits on the sign-up form.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: String,
    pub password: Secret<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub role: Option<String>,
    pub organizations: Vec<String>,
    pub department: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub area_of_interests: Vec<String>,
}

impl NewRegistration {
    /// Trims text fields and drops blank optionals.
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = non_blank(self.last_name);
        self.email = self.email.trim().to_string();
        self.mobile = self.mobile.trim().to_string();
        self.gender = non_blank(self.gender);
        self.role = non_blank(self.role);
        self.department = non_blank(self.department);
        self
    }

    /// Checks every field and reports all problems at once.
    ///
    /// # Errors
    ///
    /// `InvalidFields` with messages keyed by field name.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let mut errors = FieldErrors::default();

        if self.first_name.is_empty() {
            errors.push("first_name", "This field may not be blank.");
        } else if self.first_name.chars().count() > MAX_NAME_LEN {
            errors.push("first_name", too_long(MAX_NAME_LEN));
        }
        if let Some(last_name) = &self.last_name {
            if last_name.chars().count() > MAX_NAME_LEN {
                errors.push("last_name", too_long(MAX_NAME_LEN));
            }
        }

        if self.email.is_empty() {
            errors.push("email", "This field may not be blank.");
        } else if !is_email(&self.email) {
            errors.push("email", "Enter a valid email address.");
        }

        if !is_mobile(&self.mobile) {
            errors.push("mobile", "Enter a valid mobile number.");
        }

        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                format!("Ensure this field has at least {} characters.", MIN_PASSWORD_LEN),
            );
        }

        if let Some(gender) = &self.gender {
            if !GENDERS.contains(&gender.as_str()) {
                errors.push("gender", format!("\"{}\" is not a valid choice.", gender));
            }
        }

        if let Some(year) = self.year_of_graduation {
            if !(1900..=2100).contains(&year) {
                errors.push("year_of_graduation", "Enter a valid year.");
            }
        }

        errors.into_result()
    }

    /// Turns a validated registration into the record to persist.
    pub fn into_user(
        self,
        id: UserId,
        muid: String,
        password_hash: String,
        now: Timestamp,
    ) -> NewUser {
        NewUser {
            id,
            muid,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            mobile: self.mobile,
            gender: self.gender,
            dob: self.dob,
            password_hash,
            role: self.role,
            organizations: self.organizations,
            department: self.department,
            year_of_graduation: self.year_of_graduation,
            area_of_interests: self.area_of_interests,
            created_at: now,
        }
    }
}

/// A registered user as stored. Never carries the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub muid: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub password_hash: String,
    pub role: Option<String>,
    pub organizations: Vec<String>,
    pub department: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub area_of_interests: Vec<String>,
    pub created_at: Timestamp,
}

/// Muids to try, in order, for a user with this name.
///
/// The first candidate is `first-last@karma`; later ones append a numeric
/// suffix to the name part.
pub fn muid_candidates(first_name: &str, last_name: Option<&str>) -> impl Iterator<Item = String> {
    let full = format!("{} {}", first_name, last_name.unwrap_or(""));
    let mut slug = full
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        slug = "user".to_string();
    }

    std::iter::once(format!("{}@{}", slug, MUID_DOMAIN)).chain(
        (1..=MAX_MUID_SUFFIX).map(move |n| format!("{}-{}@{}", slug, n, MUID_DOMAIN)),
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn is_mobile(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
