//! PostgreSQL roles and dynamic role mappings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, DynamicRoleId, ErrorCode, RoleId, Timestamp, UserId,
};
use crate::domain::role::{DynamicRole, Role};
use crate::ports::{DynamicRoleRepository, RoleReader};

use super::{corrupt_row, database_error, write_error};

#[derive(Clone)]
pub struct PostgresRoleReader {
    pool: PgPool,
}

impl PostgresRoleReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_role(row: PgRow) -> Result<Role, DomainError> {
    Ok(Role {
        id: RoleId::new(row.get::<String, _>("id")).map_err(corrupt_row)?,
        title: row.get("title"),
        description: row.get("description"),
    })
}

#[async_trait]
impl RoleReader for PostgresRoleReader {
    async fn find_by_title(&self, title: &str) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query("SELECT id, title, description FROM roles WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("fetch role", e))?;

        row.map(row_to_role).transpose()
    }

    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        let rows = sqlx::query("SELECT id, title, description FROM roles ORDER BY title")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list roles", e))?;

        rows.into_iter().map(row_to_role).collect()
    }
}

#[derive(Clone)]
pub struct PostgresDynamicRoleRepository {
    pool: PgPool,
}

impl PostgresDynamicRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_mapping(row: PgRow) -> Result<DynamicRole, DomainError> {
    Ok(DynamicRole {
        id: DynamicRoleId::from_uuid(row.get::<Uuid, _>("id")),
        role_type: row.get("type"),
        role_id: RoleId::new(row.get::<String, _>("role_id")).map_err(corrupt_row)?,
        created_by: UserId::new(row.get::<String, _>("created_by")).map_err(corrupt_row)?,
        created_at: Timestamp::from_datetime(row.get::<DateTime<Utc>, _>("created_at")),
        updated_by: UserId::new(row.get::<String, _>("updated_by")).map_err(corrupt_row)?,
        updated_at: Timestamp::from_datetime(row.get::<DateTime<Utc>, _>("updated_at")),
    })
}

#[async_trait]
impl DynamicRoleRepository for PostgresDynamicRoleRepository {
    async fn save(&self, mapping: &DynamicRole) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO dynamic_roles (
                id, type, role_id, created_by, created_at, updated_by, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(mapping.id.as_uuid())
        .bind(&mapping.role_type)
        .bind(mapping.role_id.as_str())
        .bind(mapping.created_by.as_str())
        .bind(mapping.created_at.as_datetime())
        .bind(mapping.updated_by.as_str())
        .bind(mapping.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("insert dynamic role", e))?;

        Ok(())
    }

    async fn update(&self, mapping: &DynamicRole) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE dynamic_roles SET
                role_id = $2,
                updated_by = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(mapping.id.as_uuid())
        .bind(mapping.role_id.as_str())
        .bind(mapping.updated_by.as_str())
        .bind(mapping.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update dynamic role", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Dynamic role not found: {}", mapping.id),
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &DynamicRoleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM dynamic_roles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete dynamic role", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Dynamic role not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn exists(&self, role_type: &str, role_id: &RoleId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM dynamic_roles WHERE type = $1 AND role_id = $2)",
        )
        .bind(role_type)
        .bind(role_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("check dynamic role", e))?;

        Ok(exists)
    }

    async fn find_by_type_and_title(
        &self,
        role_type: &str,
        role_title: &str,
    ) -> Result<Option<DynamicRole>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT d.id, d.type, d.role_id, d.created_by, d.created_at,
                   d.updated_by, d.updated_at
            FROM dynamic_roles d
            JOIN roles r ON r.id = d.role_id
            WHERE d.type = $1 AND r.title = $2
            "#,
        )
        .bind(role_type)
        .bind(role_title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch dynamic role", e))?;

        row.map(row_to_mapping).transpose()
    }

    async fn list_types(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT DISTINCT type FROM dynamic_roles ORDER BY type")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list dynamic role types", e))
    }
}
