//! In-memory integration credentials and a stand-in auth service.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::integration::Integration;
use crate::domain::registration::TokenPair;
use crate::ports::{AuthServiceClient, AuthServiceError, IntegrationRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryIntegrationRepository {
    integrations: Arc<RwLock<HashMap<String, Integration>>>,
}

impl InMemoryIntegrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(integrations: Vec<Integration>) -> Self {
        let map = integrations
            .into_iter()
            .map(|i| (i.name.clone(), i))
            .collect();
        Self {
            integrations: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Integration>, DomainError> {
        Ok(self.integrations.read().await.get(name).cloned())
    }
}

/// Auth service stand-in. Issues `access-<login>` / `refresh-<login>` pairs.
#[derive(Debug, Clone, Default)]
pub struct StubAuthService {
    credentials: Arc<RwLock<HashMap<String, String>>>,
    authenticated: Arc<RwLock<Vec<String>>>,
    accept_all: bool,
}

impl StubAuthService {
    /// Knows no users; every request is rejected until `register` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any credentials.
    pub fn accepting_all() -> Self {
        Self {
            accept_all: true,
            ..Self::default()
        }
    }

    pub async fn register(&self, login: &str, password: &str) {
        self.credentials
            .write()
            .await
            .insert(login.to_string(), password.to_string());
    }

    /// Logins that authenticated successfully, in order.
    pub async fn authenticated(&self) -> Vec<String> {
        self.authenticated.read().await.clone()
    }

    fn pair(login: &str) -> TokenPair {
        TokenPair {
            access_token: format!("access-{}", login),
            refresh_token: format!("refresh-{}", login),
        }
    }
}

#[async_trait]
impl AuthServiceClient for StubAuthService {
    async fn authenticate(
        &self,
        email_or_muid: &str,
        password: &Secret<String>,
    ) -> Result<TokenPair, AuthServiceError> {
        let known = self.credentials.read().await.get(email_or_muid).cloned();
        let accepted = self.accept_all
            || known.as_deref() == Some(password.expose_secret().as_str());
        if !accepted {
            return Err(AuthServiceError::Rejected("Invalid credentials".to_string()));
        }
        self.authenticated
            .write()
            .await
            .push(email_or_muid.to_string());
        Ok(Self::pair(email_or_muid))
    }

    async fn verify_token(&self, token: &str) -> Result<TokenPair, AuthServiceError> {
        let login = token
            .strip_prefix("access-")
            .ok_or_else(|| AuthServiceError::Rejected("Invalid token".to_string()))?;
        if !self.accept_all && !self.credentials.read().await.contains_key(login) {
            return Err(AuthServiceError::Rejected("Invalid token".to_string()));
        }
        Ok(Self::pair(login))
    }
}
