//! In-memory users and reference data.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::registration::{
    Country, Department, District, InterestGroup, LearningCircleUser, NewUser, OrgType,
    Organization, State, Zone,
};
use crate::ports::{ReferenceDataReader, UserRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<NewUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<NewUser> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.iter().any(|u| u.email == email))
    }

    async fn muid_exists(&self, muid: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().await.iter().any(|u| u.muid == muid))
    }

    async fn save(&self, user: &NewUser) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email == user.email || u.muid == user.muid)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "user with this email or muid already exists",
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_learning_circle_user(
        &self,
        muid: &str,
    ) -> Result<Option<LearningCircleUser>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.muid == muid)
            .map(|u| {
                LearningCircleUser::new(
                    u.id.clone(),
                    u.muid.clone(),
                    &u.first_name,
                    u.last_name.as_deref(),
                    u.email.clone(),
                    u.mobile.clone(),
                )
            }))
    }
}

/// Static reference tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceData {
    pub countries: Vec<Country>,
    pub states: Vec<State>,
    pub zones: Vec<Zone>,
    pub districts: Vec<District>,
    pub organizations: Vec<Organization>,
    pub departments: Vec<Department>,
    pub interest_groups: Vec<InterestGroup>,
}

impl InMemoryReferenceData {
    /// A small, consistent data set: one country with one state (two zones,
    /// two districts), a state without zones, and one organization per type.
    pub fn sample() -> Self {
        let s = |v: &str| v.to_string();
        Self {
            countries: vec![Country { id: s("c-in"), name: s("India") }],
            states: vec![
                State { id: s("st-kl"), name: s("Kerala"), country_id: s("c-in") },
                State { id: s("st-goa"), name: s("Goa"), country_id: s("c-xx") },
            ],
            zones: vec![
                Zone { id: s("z-central"), name: s("Central"), state_id: s("st-kl") },
                Zone { id: s("z-north"), name: s("North"), state_id: s("st-kl") },
            ],
            districts: vec![
                District { id: s("d-ekm"), name: s("Ernakulam"), zone_id: s("z-central") },
                District { id: s("d-kzd"), name: s("Kozhikode"), zone_id: s("z-north") },
            ],
            organizations: vec![
                Organization {
                    id: s("o-cet"),
                    title: s("College of Engineering"),
                    code: s("CET"),
                    org_type: OrgType::College,
                    district_id: Some(s("d-ekm")),
                },
                Organization {
                    id: s("o-acme"),
                    title: s("Acme"),
                    code: s("ACME"),
                    org_type: OrgType::Company,
                    district_id: None,
                },
                Organization {
                    id: s("o-foss"),
                    title: s("FOSS Club"),
                    code: s("FOSS"),
                    org_type: OrgType::Community,
                    district_id: Some(s("d-kzd")),
                },
            ],
            departments: vec![
                Department { id: s("dep-cs"), title: s("Computer Science") },
                Department { id: s("dep-me"), title: s("Mechanical") },
            ],
            interest_groups: vec![InterestGroup { id: s("ig-web"), name: s("Web Development") }],
        }
    }
}

#[async_trait]
impl ReferenceDataReader for InMemoryReferenceData {
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError> {
        Ok(self.countries.clone())
    }

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, DomainError> {
        Ok(self.countries.iter().find(|c| c.name == name).cloned())
    }

    async fn list_states(&self, country_id: &str) -> Result<Vec<State>, DomainError> {
        Ok(self
            .states
            .iter()
            .filter(|s| s.country_id == country_id)
            .cloned()
            .collect())
    }

    async fn find_state_by_name(&self, name: &str) -> Result<Option<State>, DomainError> {
        Ok(self.states.iter().find(|s| s.name == name).cloned())
    }

    async fn list_zones(&self, state_id: &str) -> Result<Vec<Zone>, DomainError> {
        Ok(self
            .zones
            .iter()
            .filter(|z| z.state_id == state_id)
            .cloned()
            .collect())
    }

    async fn list_districts_by_state(&self, state_id: &str) -> Result<Vec<District>, DomainError> {
        let zones: Vec<&str> = self
            .zones
            .iter()
            .filter(|z| z.state_id == state_id)
            .map(|z| z.id.as_str())
            .collect();
        let mut districts: Vec<District> = self
            .districts
            .iter()
            .filter(|d| zones.contains(&d.zone_id.as_str()))
            .cloned()
            .collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(districts)
    }

    async fn list_organizations(
        &self,
        org_type: OrgType,
        district_id: Option<&str>,
    ) -> Result<Vec<Organization>, DomainError> {
        Ok(self
            .organizations
            .iter()
            .filter(|o| o.org_type == org_type)
            .filter(|o| district_id.is_none() || o.district_id.as_deref() == district_id)
            .cloned()
            .collect())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        Ok(self.departments.clone())
    }

    async fn list_interest_groups(&self) -> Result<Vec<InterestGroup>, DomainError> {
        Ok(self.interest_groups.clone())
    }
}
