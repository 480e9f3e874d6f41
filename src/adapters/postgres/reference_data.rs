//! PostgreSQL reference tables for the sign-up form.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::domain::registration::{
    Country, Department, District, InterestGroup, OrgType, Organization, State, Zone,
};
use crate::ports::ReferenceDataReader;

use super::{corrupt_row, database_error};

#[derive(Clone)]
pub struct PostgresReferenceData {
    pool: PgPool,
}

impl PostgresReferenceData {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceDataReader for PostgresReferenceData {
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list countries", e))?;

        Ok(rows
            .into_iter()
            .map(|row| Country {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn find_country_by_name(&self, name: &str) -> Result<Option<Country>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM countries WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch country", e))?;

        Ok(row.map(|row| Country {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    async fn list_states(&self, country_id: &str) -> Result<Vec<State>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, country_id FROM states WHERE country_id = $1 ORDER BY name",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list states", e))?;

        Ok(rows
            .into_iter()
            .map(|row| State {
                id: row.get("id"),
                name: row.get("name"),
                country_id: row.get("country_id"),
            })
            .collect())
    }

    async fn find_state_by_name(&self, name: &str) -> Result<Option<State>, DomainError> {
        let row = sqlx::query("SELECT id, name, country_id FROM states WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch state", e))?;

        Ok(row.map(|row| State {
            id: row.get("id"),
            name: row.get("name"),
            country_id: row.get("country_id"),
        }))
    }

    async fn list_zones(&self, state_id: &str) -> Result<Vec<Zone>, DomainError> {
        let rows =
            sqlx::query("SELECT id, name, state_id FROM zones WHERE state_id = $1 ORDER BY name")
                .bind(state_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| database_error("list zones", e))?;

        Ok(rows
            .into_iter()
            .map(|row| Zone {
                id: row.get("id"),
                name: row.get("name"),
                state_id: row.get("state_id"),
            })
            .collect())
    }

    async fn list_districts_by_state(&self, state_id: &str) -> Result<Vec<District>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.name, d.zone_id
            FROM districts d
            JOIN zones z ON z.id = d.zone_id
            WHERE z.state_id = $1
            ORDER BY d.name
            "#,
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list districts", e))?;

        Ok(rows
            .into_iter()
            .map(|row| District {
                id: row.get("id"),
                name: row.get("name"),
                zone_id: row.get("zone_id"),
            })
            .collect())
    }

    async fn list_organizations(
        &self,
        org_type: OrgType,
        district_id: Option<&str>,
    ) -> Result<Vec<Organization>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, code, org_type, district_id
            FROM organizations
            WHERE org_type = $1 AND ($2::text IS NULL OR district_id = $2)
            ORDER BY title
            "#,
        )
        .bind(org_type.as_str())
        .bind(district_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list organizations", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(Organization {
                    id: row.get("id"),
                    title: row.get("title"),
                    code: row.get("code"),
                    org_type: row
                        .get::<String, _>("org_type")
                        .parse()
                        .map_err(corrupt_row)?,
                    district_id: row.get("district_id"),
                })
            })
            .collect()
    }

    async fn list_departments(&self) -> Result<Vec<Department>, DomainError> {
        let rows = sqlx::query("SELECT id, title FROM departments ORDER BY title")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list departments", e))?;

        Ok(rows
            .into_iter()
            .map(|row| Department {
                id: row.get("id"),
                title: row.get("title"),
            })
            .collect())
    }

    async fn list_interest_groups(&self) -> Result<Vec<InterestGroup>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM interest_groups ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list interest groups", e))?;

        Ok(rows
            .into_iter()
            .map(|row| InterestGroup {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}
