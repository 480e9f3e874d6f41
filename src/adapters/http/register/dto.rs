//! Request and response shapes for registration endpoints.

use chrono::NaiveDate;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::application::handlers::registration::{CollegeListing, RegisterUserResult};
use crate::domain::registration::{
    Country, Department, District, InterestGroup, NewRegistration, Organization, State,
    UserDetail,
};
use crate::domain::role::Role;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub password: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub role: Option<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(alias = "dept")]
    pub department: Option<String>,
    pub year_of_graduation: Option<i32>,
    #[serde(default)]
    pub area_of_interests: Vec<String>,
}

impl From<RegisterRequest> for NewRegistration {
    fn from(request: RegisterRequest) -> Self {
        NewRegistration {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            mobile: request.mobile,
            password: Secret::new(request.password),
            gender: request.gender,
            dob: request.dob,
            role: request.role,
            organizations: request.organizations,
            department: request.department,
            year_of_graduation: request.year_of_graduation,
            area_of_interests: request.area_of_interests,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub data: UserDetail,
}

impl From<RegisterUserResult> for RegisterResponse {
    fn from(result: RegisterUserResult) -> Self {
        Self {
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
            data: result.user,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountryFilter {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StateFilter {
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DistrictFilter {
    #[serde(default)]
    pub district: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailCheckRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct EmailCheckResponse {
    pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentsResponse {
    pub department: Vec<Department>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub states: Vec<State>,
}

#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub districts: Vec<District>,
}

#[derive(Debug, Serialize)]
pub struct CollegesResponse {
    pub colleges: Vec<Organization>,
    pub departments: Vec<Department>,
}

impl From<CollegeListing> for CollegesResponse {
    fn from(listing: CollegeListing) -> Self {
        Self {
            colleges: listing.colleges,
            departments: listing.departments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Organization>,
}

#[derive(Debug, Serialize)]
pub struct CommunitiesResponse {
    pub communities: Vec<Organization>,
}

#[derive(Debug, Serialize)]
pub struct InterestGroupsResponse {
    pub aois: Vec<InterestGroup>,
}
