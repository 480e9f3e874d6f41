//! Reference data queries for the sign-up form.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::registration::{
    Country, Department, District, InterestGroup, OrgType, Organization, State, Zone,
};
use crate::domain::role::Role;
use crate::ports::{ReferenceDataReader, RoleReader};

/// Result of a name-based location lookup. `notice` explains an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationLookup<T> {
    pub items: Vec<T>,
    pub notice: Option<&'static str>,
}

impl<T> LocationLookup<T> {
    fn found(items: Vec<T>, empty_notice: &'static str) -> Self {
        let notice = items.is_empty().then_some(empty_notice);
        Self { items, notice }
    }

    fn missing(notice: &'static str) -> Self {
        Self {
            items: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// Colleges of a district together with every department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollegeListing {
    pub colleges: Vec<Organization>,
    pub departments: Vec<Department>,
}

pub struct ReferenceDataHandler {
    reference: Arc<dyn ReferenceDataReader>,
    roles: Arc<dyn RoleReader>,
}

impl ReferenceDataHandler {
    pub fn new(reference: Arc<dyn ReferenceDataReader>, roles: Arc<dyn RoleReader>) -> Self {
        Self { reference, roles }
    }

    pub async fn roles(&self) -> Result<Vec<Role>, DomainError> {
        self.roles.list().await
    }

    pub async fn departments(&self) -> Result<Vec<Department>, DomainError> {
        self.reference.list_departments().await
    }

    pub async fn countries(&self) -> Result<Vec<Country>, DomainError> {
        self.reference.list_countries().await
    }

    pub async fn states(&self, country_id: &str) -> Result<Vec<State>, DomainError> {
        self.reference.list_states(country_id).await
    }

    pub async fn districts(&self, state_id: &str) -> Result<Vec<District>, DomainError> {
        self.reference.list_districts_by_state(state_id).await
    }

    pub async fn colleges(&self, district_id: &str) -> Result<CollegeListing, DomainError> {
        let colleges = self
            .reference
            .list_organizations(OrgType::College, Some(district_id))
            .await?;
        let departments = self.reference.list_departments().await?;
        Ok(CollegeListing {
            colleges,
            departments,
        })
    }

    pub async fn organizations(&self, org_type: OrgType) -> Result<Vec<Organization>, DomainError> {
        self.reference.list_organizations(org_type, None).await
    }

    pub async fn interest_groups(&self) -> Result<Vec<InterestGroup>, DomainError> {
        self.reference.list_interest_groups().await
    }

    pub async fn states_of_country(
        &self,
        country_name: &str,
    ) -> Result<LocationLookup<State>, DomainError> {
        let Some(country) = self.reference.find_country_by_name(country_name).await? else {
            return Ok(LocationLookup::missing("No country data available"));
        };
        let states = self.reference.list_states(&country.id).await?;
        Ok(LocationLookup::found(
            states,
            "No state data available for given country",
        ))
    }

    pub async fn zones_of_state(&self, state_name: &str) -> Result<LocationLookup<Zone>, DomainError> {
        let Some(state) = self.reference.find_state_by_name(state_name).await? else {
            return Ok(LocationLookup::missing("No state data available"));
        };
        let zones = self.reference.list_zones(&state.id).await?;
        Ok(LocationLookup::found(
            zones,
            "No zone data available for given state",
        ))
    }
}
