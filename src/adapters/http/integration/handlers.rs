//! HTTP handlers for integration endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::envelope::{ApiResponse, EnvelopeJson};
use crate::application::handlers::integration::{
    AccessTokenGrant, AuthorizeIntegrationHandler, ExchangeAccessTokenHandler,
    IssueConfirmationTokenHandler, VerifyConfirmationTokenHandler,
};
use crate::domain::integration::{ConfirmationTokens, Integration, IntegrationError};
use crate::ports::{AuthServiceClient, IntegrationRepository};

use super::dto::{
    AccessTokenRequest, ConfirmationTokenRequest, ConfirmationTokenResponse, VerifyTokenRequest,
    VerifyTokenResponse,
};

#[derive(Clone)]
pub struct IntegrationAppState {
    pub integrations: Arc<dyn IntegrationRepository>,
    pub auth_service: Arc<dyn AuthServiceClient>,
    pub tokens: ConfirmationTokens,
}

impl IntegrationAppState {
    pub fn authorize_handler(&self) -> AuthorizeIntegrationHandler {
        AuthorizeIntegrationHandler::new(self.integrations.clone())
    }

    pub fn issue_handler(&self) -> IssueConfirmationTokenHandler {
        IssueConfirmationTokenHandler::new(self.tokens.clone())
    }

    pub fn verify_handler(&self) -> VerifyConfirmationTokenHandler {
        VerifyConfirmationTokenHandler::new(self.tokens.clone())
    }

    pub fn exchange_handler(&self) -> ExchangeAccessTokenHandler {
        ExchangeAccessTokenHandler::new(self.auth_service.clone())
    }

    /// Checks the caller's bearer token against the named integration.
    async fn authorize(&self, name: &str, headers: &HeaderMap) -> Result<Integration, IntegrationError> {
        let authorization = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        self.authorize_handler().handle(name, authorization).await
    }
}

/// POST /api/v1/integrations/:name/confirmation-token/
pub async fn issue_confirmation_token(
    State(state): State<IntegrationAppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    EnvelopeJson(request): EnvelopeJson<ConfirmationTokenRequest>,
) -> Result<impl IntoResponse, IntegrationApiError> {
    state.authorize(&name, &headers).await?;

    let authorization_id = request.authorization_id.trim();
    if authorization_id.is_empty() {
        return Err(IntegrationError::validation("authorization_id", "This field may not be blank.").into());
    }
    let token = state.issue_handler().handle(authorization_id)?;

    Ok(ApiResponse::success(ConfirmationTokenResponse { token }))
}

/// POST /api/v1/integrations/:name/verify-token/
pub async fn verify_confirmation_token(
    State(state): State<IntegrationAppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    EnvelopeJson(request): EnvelopeJson<VerifyTokenRequest>,
) -> Result<impl IntoResponse, IntegrationApiError> {
    state.authorize(&name, &headers).await?;

    let authorization_id = state.verify_handler().handle(&request.token)?;

    Ok(ApiResponse::success(VerifyTokenResponse { authorization_id }))
}

/// POST /api/v1/integrations/:name/access-token/
pub async fn exchange_access_token(
    State(state): State<IntegrationAppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    EnvelopeJson(request): EnvelopeJson<AccessTokenRequest>,
) -> Result<impl IntoResponse, IntegrationApiError> {
    let integration = state.authorize(&name, &headers).await?;

    let grant = AccessTokenGrant::try_from(request)?;
    let tokens = state.exchange_handler().handle(grant).await?;
    tracing::debug!(integration = %integration.name, "Access token issued");

    Ok(ApiResponse::success(tokens))
}

#[derive(Debug)]
pub struct IntegrationApiError(IntegrationError);

impl From<IntegrationError> for IntegrationApiError {
    fn from(err: IntegrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for IntegrationApiError {
    fn into_response(self) -> Response {
        match self.0 {
            IntegrationError::Validation { field, message } => {
                let mut fields = BTreeMap::new();
                fields.insert(field, vec![message]);
                ApiResponse::invalid_fields("Invalid fields", fields).into_response()
            }
            IntegrationError::Signing(reason) | IntegrationError::Infrastructure(reason) => {
                tracing::error!(reason = %reason, "Integration request failed");
                ApiResponse::internal().into_response()
            }
            err => ApiResponse::failure(err.to_string()).into_response(),
        }
    }
}
