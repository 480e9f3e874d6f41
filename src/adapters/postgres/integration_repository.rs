//! PostgreSQL integration credentials.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::domain::integration::Integration;
use crate::ports::IntegrationRepository;

use super::database_error;

#[derive(Clone)]
pub struct PostgresIntegrationRepository {
    pool: PgPool,
}

impl PostgresIntegrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntegrationRepository for PostgresIntegrationRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Integration>, DomainError> {
        let row = sqlx::query("SELECT name, token FROM integrations WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch integration", e))?;

        Ok(row.map(|row| Integration::new(row.get::<String, _>("name"), row.get::<String, _>("token"))))
    }
}
