//! PostgreSQL user accounts created by registration.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::registration::{LearningCircleUser, NewUser};
use crate::ports::UserRepository;

use super::{corrupt_row, database_error, write_error};

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("check email", e))
    }

    async fn muid_exists(&self, muid: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE muid = $1)")
            .bind(muid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("check muid", e))
    }

    /// Writes the user and their role, organization and interest links in
    /// one transaction.
    async fn save(&self, user: &NewUser) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin registration", e))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, muid, first_name, last_name, email, mobile,
                gender, dob, password, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.muid)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.gender)
        .bind(user.dob)
        .bind(&user.password_hash)
        .bind(user.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("insert user", e))?;

        if let Some(role_id) = &user.role {
            sqlx::query("INSERT INTO user_role_links (user_id, role_id) VALUES ($1, $2)")
                .bind(user.id.as_str())
                .bind(role_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| write_error("link user role", e))?;
        }

        for org_id in &user.organizations {
            sqlx::query(
                r#"
                INSERT INTO user_organization_links (user_id, org_id, department_id, graduation_year)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(user.id.as_str())
            .bind(org_id)
            .bind(&user.department)
            .bind(user.year_of_graduation)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("link user organization", e))?;
        }

        for group_id in &user.area_of_interests {
            sqlx::query(
                "INSERT INTO user_interest_groups (user_id, interest_group_id) VALUES ($1, $2)",
            )
            .bind(user.id.as_str())
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error("link interest group", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("commit registration", e))
    }

    async fn find_learning_circle_user(
        &self,
        muid: &str,
    ) -> Result<Option<LearningCircleUser>, DomainError> {
        let row = sqlx::query(
            "SELECT id, muid, first_name, last_name, email, mobile FROM users WHERE muid = $1",
        )
        .bind(muid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch user by muid", e))?;

        row.map(|row| {
            let last_name: Option<String> = row.get("last_name");
            Ok(LearningCircleUser::new(
                UserId::new(row.get::<String, _>("id")).map_err(corrupt_row)?,
                row.get::<String, _>("muid"),
                &row.get::<String, _>("first_name"),
                last_name.as_deref(),
                row.get::<String, _>("email"),
                row.get::<String, _>("mobile"),
            ))
        })
        .transpose()
    }
}
