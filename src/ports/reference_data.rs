//! Reference data read by the registration form.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::registration::{
    Country, Department, District, InterestGroup, OrgType, Organization, State, Zone,
};

/// Read-only access to locations, organizations and interest groups.
///
/// Every list is ordered by name or title.
#[async_trait]
pub trait ReferenceDataReader: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError>;

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, DomainError>;

    async fn list_states(&self, country_id: &str) -> Result<Vec<State>, DomainError>;

    async fn find_state_by_name(&self, name: &str) -> Result<Option<State>, DomainError>;

    async fn list_zones(&self, state_id: &str) -> Result<Vec<Zone>, DomainError>;

    /// Districts of every zone in the state.
    async fn list_districts_by_state(&self, state_id: &str) -> Result<Vec<District>, DomainError>;

    /// Organizations of one type, optionally limited to a district.
    async fn list_organizations(
        &self,
        org_type: OrgType,
        district_id: Option<&str>,
    ) -> Result<Vec<Organization>, DomainError>;

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError>;

    async fn list_interest_groups(&self) -> Result<Vec<InterestGroup>, DomainError>;
}
