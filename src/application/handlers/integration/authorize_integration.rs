//! AuthorizeIntegrationHandler - checks an integration's bearer token.

use std::sync::Arc;

use tracing::warn;

use crate::domain::integration::{bearer_token, Integration, IntegrationError};
use crate::ports::IntegrationRepository;

pub struct AuthorizeIntegrationHandler {
    repository: Arc<dyn IntegrationRepository>,
}

impl AuthorizeIntegrationHandler {
    pub fn new(repository: Arc<dyn IntegrationRepository>) -> Self {
        Self { repository }
    }

    /// Accepts the request only if `authorization` is `Bearer <token>` and
    /// the token belongs to the integration called `name`.
    ///
    /// Every failure reads the same to the caller.
    pub async fn handle(
        &self,
        name: &str,
        authorization: Option<&str>,
    ) -> Result<Integration, IntegrationError> {
        let token = bearer_token(authorization)?;

        let integration = self
            .repository
            .find_by_name(name)
            .await?
            .filter(|integration| integration.accepts(token));

        integration.ok_or_else(|| {
            warn!(integration = name, "Rejected integration token");
            IntegrationError::InvalidAuthorizationHeader
        })
    }
}
