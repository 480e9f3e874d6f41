//! HTTP handlers for registration endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::envelope::{ApiResponse, EnvelopeJson};
use crate::application::handlers::registration::{
    CheckEmailHandler, LearningCircleUserHandler, LocationLookup, ReferenceDataHandler,
    RegisterUserHandler,
};
use crate::domain::foundation::DomainError;
use crate::domain::registration::{OrgType, RegistrationError};
use crate::ports::{
    AuthServiceClient, EmailSender, PasswordHasher, ReferenceDataReader, RoleReader,
    UserRepository,
};

use super::dto::{
    CollegesResponse, CommunitiesResponse, CompaniesResponse, CountriesResponse, CountryFilter,
    DepartmentsResponse, DistrictFilter, DistrictsResponse, EmailCheckRequest, EmailCheckResponse,
    InterestGroupsResponse, RegisterRequest, RegisterResponse, RolesResponse, StateFilter,
    StatesResponse,
};

/// Header carrying the muid for the learning-circle lookup.
pub const MUID_HEADER: &str = "muid";

#[derive(Clone)]
pub struct RegisterAppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub auth_service: Arc<dyn AuthServiceClient>,
    pub email: Arc<dyn EmailSender>,
    pub reference: Arc<dyn ReferenceDataReader>,
    pub roles: Arc<dyn RoleReader>,
}

impl RegisterAppState {
    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.auth_service.clone(),
            self.email.clone(),
        )
    }

    pub fn learning_circle_handler(&self) -> LearningCircleUserHandler {
        LearningCircleUserHandler::new(self.users.clone())
    }

    pub fn check_email_handler(&self) -> CheckEmailHandler {
        CheckEmailHandler::new(self.users.clone())
    }

    pub fn reference_handler(&self) -> ReferenceDataHandler {
        ReferenceDataHandler::new(self.reference.clone(), self.roles.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Registration
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/register/
pub async fn register_user(
    State(state): State<RegisterAppState>,
    EnvelopeJson(request): EnvelopeJson<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let result = state.register_handler().handle(request.into()).await?;
    Ok(ApiResponse::success(RegisterResponse::from(result)))
}

/// POST /api/v1/register/lc/user-validation/
pub async fn learning_circle_user(
    State(state): State<RegisterAppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, RegisterApiError> {
    let muid = headers.get(MUID_HEADER).and_then(|h| h.to_str().ok());
    let user = state.learning_circle_handler().handle(muid).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/v1/register/email-verification/
pub async fn verify_email(
    State(state): State<RegisterAppState>,
    EnvelopeJson(request): EnvelopeJson<EmailCheckRequest>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let exists = state.check_email_handler().handle(&request.email).await?;
    let message = if exists {
        "This email already exists"
    } else {
        "User email not exist"
    };
    Ok(ApiResponse::success(EmailCheckResponse { value: exists }).with_message(message))
}

// ════════════════════════════════════════════════════════════════════════════════
// Reference lists
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/register/role/list/
pub async fn list_roles(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let roles = state.reference_handler().roles().await?;
    Ok(ApiResponse::success(RolesResponse { roles }))
}

/// GET /api/v1/register/department/list/
pub async fn list_departments(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let department = state.reference_handler().departments().await?;
    Ok(ApiResponse::success(DepartmentsResponse { department }))
}

/// GET /api/v1/register/country/list/
pub async fn list_countries(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let countries = state.reference_handler().countries().await?;
    Ok(ApiResponse::success(CountriesResponse { countries }))
}

/// POST /api/v1/register/state/list/
pub async fn list_states(
    State(state): State<RegisterAppState>,
    EnvelopeJson(filter): EnvelopeJson<CountryFilter>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let states = state.reference_handler().states(&filter.country).await?;
    Ok(ApiResponse::success(StatesResponse { states }))
}

/// POST /api/v1/register/district/list/
pub async fn list_districts(
    State(state): State<RegisterAppState>,
    EnvelopeJson(filter): EnvelopeJson<StateFilter>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let districts = state.reference_handler().districts(&filter.state).await?;
    Ok(ApiResponse::success(DistrictsResponse { districts }))
}

/// POST /api/v1/register/college/list/
pub async fn list_colleges(
    State(state): State<RegisterAppState>,
    EnvelopeJson(filter): EnvelopeJson<DistrictFilter>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let listing = state.reference_handler().colleges(&filter.district).await?;
    Ok(ApiResponse::success(CollegesResponse::from(listing)))
}

/// GET /api/v1/register/company/list/
pub async fn list_companies(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let companies = state.reference_handler().organizations(OrgType::Company).await?;
    Ok(ApiResponse::success(CompaniesResponse { companies }))
}

/// GET /api/v1/register/community/list/
pub async fn list_communities(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let communities = state.reference_handler().organizations(OrgType::Community).await?;
    Ok(ApiResponse::success(CommunitiesResponse { communities }))
}

/// GET /api/v1/register/area-of-interest/list/
pub async fn list_interest_groups(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let aois = state.reference_handler().interest_groups().await?;
    Ok(ApiResponse::success(InterestGroupsResponse { aois }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Location lookups by name
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/register/location/country/
pub async fn location_countries(
    State(state): State<RegisterAppState>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let countries = state.reference_handler().countries().await?;
    if countries.is_empty() {
        return Ok(ApiResponse::success(countries).with_message("No data available"));
    }
    Ok(ApiResponse::success(countries))
}

/// GET /api/v1/register/location/state/?country=<name>
pub async fn location_states(
    State(state): State<RegisterAppState>,
    Query(filter): Query<CountryFilter>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let lookup = state.reference_handler().states_of_country(&filter.country).await?;
    Ok(location_response(lookup))
}

/// GET /api/v1/register/location/zone/?state=<name>
pub async fn location_zones(
    State(state): State<RegisterAppState>,
    Query(filter): Query<StateFilter>,
) -> Result<impl IntoResponse, RegisterApiError> {
    let lookup = state.reference_handler().zones_of_state(&filter.state).await?;
    Ok(location_response(lookup))
}

fn location_response<T: serde::Serialize>(lookup: LocationLookup<T>) -> ApiResponse {
    let response = ApiResponse::success(lookup.items);
    match lookup.notice {
        Some(notice) => response.with_message(notice),
        None => response,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct RegisterApiError(RegistrationError);

impl From<RegistrationError> for RegisterApiError {
    fn from(err: RegistrationError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for RegisterApiError {
    fn from(err: DomainError) -> Self {
        Self(RegistrationError::from(err))
    }
}

impl IntoResponse for RegisterApiError {
    fn into_response(self) -> Response {
        match self.0 {
            RegistrationError::InvalidFields(fields) => {
                ApiResponse::invalid_fields("Invalid fields", fields).into_response()
            }
            RegistrationError::PasswordHash(reason) | RegistrationError::Infrastructure(reason) => {
                tracing::error!(reason = %reason, "Registration request failed");
                ApiResponse::internal().into_response()
            }
            err => ApiResponse::failure(err.to_string()).into_response(),
        }
    }
}
