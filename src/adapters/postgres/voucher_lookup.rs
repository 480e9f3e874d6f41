//! PostgreSQL lookups used by the voucher import.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, TaskId, UserId};
use crate::domain::voucher::{TaskRef, UserRef};
use crate::ports::{TaskCatalog, UserDirectory};

use super::{corrupt_row, database_error};

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<UserRef>, DomainError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name
            FROM users
            WHERE email = ANY($1)
            "#,
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("look up users by email", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(UserRef {
                    id: UserId::new(row.get::<String, _>("id")).map_err(corrupt_row)?,
                    email: row.get("email"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                })
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct PostgresTaskCatalog {
    pool: PgPool,
}

impl PostgresTaskCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskCatalog for PostgresTaskCatalog {
    async fn find_by_hashtags(&self, hashtags: &[String]) -> Result<Vec<TaskRef>, DomainError> {
        if hashtags.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query("SELECT id, hashtag FROM tasks WHERE hashtag = ANY($1)")
            .bind(hashtags)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("look up tasks by hashtag", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(TaskRef {
                    id: TaskId::new(row.get::<String, _>("id")).map_err(corrupt_row)?,
                    hashtag: row.get("hashtag"),
                })
            })
            .collect()
    }
}
