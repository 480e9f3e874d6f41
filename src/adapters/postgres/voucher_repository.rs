//! PostgreSQL voucher log.
//!
//! Batch inserts run in one transaction, chunked to stay under the bind
//! parameter limit. The listing query is assembled with `QueryBuilder`
//! from a fixed set of sortable columns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Page, Timestamp, VoucherId};
use crate::domain::voucher::{
    VoucherListItem, VoucherListQuery, VoucherRecord, VoucherSortKey,
};
use crate::ports::{VoucherReader, VoucherRepository};

use super::{database_error, write_error};

/// Rows per INSERT statement (12 binds each).
const INSERT_CHUNK: usize = 1_000;

const INSERT_COLUMNS: &str = "INSERT INTO voucher_log \
    (id, code, user_id, task_id, karma, month, week, claimed, \
     created_by, updated_by, created_at, updated_at) ";

const LIST_FROM: &str = " FROM voucher_log v \
    JOIN users u ON u.id = v.user_id \
    JOIN tasks t ON t.id = v.task_id \
    LEFT JOIN users cb ON cb.id = v.created_by \
    LEFT JOIN users ub ON ub.id = v.updated_by";

const USER_NAME: &str = "CONCAT_WS(' ', u.first_name, NULLIF(TRIM(u.last_name), ''))";
const CREATED_BY_NAME: &str = "CONCAT_WS(' ', cb.first_name, NULLIF(TRIM(cb.last_name), ''))";
const UPDATED_BY_NAME: &str = "CONCAT_WS(' ', ub.first_name, NULLIF(TRIM(ub.last_name), ''))";

#[derive(Clone)]
pub struct PostgresVoucherRepository {
    pool: PgPool,
}

impl PostgresVoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_records(builder: &mut QueryBuilder<'_, Postgres>, records: &[VoucherRecord]) {
    builder.push_values(records, |mut row, record| {
        row.push_bind(*record.id.as_uuid())
            .push_bind(record.code.to_string())
            .push_bind(record.user_id.as_str().to_string())
            .push_bind(record.task_id.as_str().to_string())
            .push_bind(record.karma)
            .push_bind(record.month.clone())
            .push_bind(record.week.clone())
            .push_bind(record.claimed)
            .push_bind(record.created_by.as_str().to_string())
            .push_bind(record.updated_by.as_str().to_string())
            .push_bind(*record.created_at.as_datetime())
            .push_bind(*record.updated_at.as_datetime());
    });
}

#[async_trait]
impl VoucherRepository for PostgresVoucherRepository {
    async fn insert_batch(&self, records: &[VoucherRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("begin voucher batch", e))?;

        for chunk in records.chunks(INSERT_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(INSERT_COLUMNS);
            push_records(&mut builder, chunk);
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| write_error("insert voucher batch", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("commit voucher batch", e))
    }

    async fn insert(&self, record: &VoucherRecord) -> Result<(), DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(INSERT_COLUMNS);
        push_records(&mut builder, std::slice::from_ref(record));
        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("insert voucher", e))?;
        Ok(())
    }
}

fn sort_column(key: VoucherSortKey) -> &'static str {
    match key {
        VoucherSortKey::User => USER_NAME,
        VoucherSortKey::Code => "v.code",
        VoucherSortKey::Karma => "v.karma",
        VoucherSortKey::Claimed => "v.claimed",
        VoucherSortKey::Task => "t.title",
        VoucherSortKey::Week => "v.week",
        VoucherSortKey::Month => "v.month",
        VoucherSortKey::UpdatedBy => UPDATED_BY_NAME,
        VoucherSortKey::UpdatedAt => "v.updated_at",
        VoucherSortKey::CreatedAt => "v.created_at",
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_search(builder: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) else {
        return;
    };
    let pattern = like_pattern(term);
    let columns = [
        USER_NAME,
        "t.title",
        "v.karma::text",
        "v.month",
        "v.week",
        "v.claimed::text",
        CREATED_BY_NAME,
        UPDATED_BY_NAME,
    ];

    builder.push(" WHERE (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder
            .push(*column)
            .push(" ILIKE ")
            .push_bind(pattern.clone());
    }
    builder.push(")");
}

fn row_to_item(row: PgRow) -> Result<VoucherListItem, sqlx::Error> {
    Ok(VoucherListItem {
        id: VoucherId::from_uuid(row.try_get::<Uuid, _>("id")?),
        code: row.try_get("code")?,
        user: row.try_get("user_name")?,
        task: row.try_get("task_title")?,
        karma: row.try_get("karma")?,
        month: row.try_get("month")?,
        week: row.try_get("week")?,
        claimed: row.try_get("claimed")?,
        created_by: row.try_get("created_by_name")?,
        updated_by: row.try_get("updated_by_name")?,
        created_at: Timestamp::from_datetime(row.try_get::<DateTime<Utc>, _>("created_at")?),
        updated_at: Timestamp::from_datetime(row.try_get::<DateTime<Utc>, _>("updated_at")?),
    })
}

#[async_trait]
impl VoucherReader for PostgresVoucherRepository {
    async fn list(&self, query: &VoucherListQuery) -> Result<Page<VoucherListItem>, DomainError> {
        let search = query.search.as_deref();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        count.push(LIST_FROM);
        push_search(&mut count, search);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("count vouchers", e))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT v.id, v.code, {} AS user_name, t.title AS task_title, v.karma, \
             v.month, v.week, v.claimed, {} AS created_by_name, {} AS updated_by_name, \
             v.created_at, v.updated_at",
            USER_NAME, CREATED_BY_NAME, UPDATED_BY_NAME
        ));
        select.push(LIST_FROM);
        push_search(&mut select, search);
        select
            .push(" ORDER BY ")
            .push(sort_column(query.sort.key))
            .push(if query.sort.descending { " DESC" } else { " ASC" })
            .push(", v.id ASC LIMIT ")
            .push_bind(i64::from(query.page.per_page()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("list vouchers", e))?;

        let items = rows
            .into_iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| database_error("decode voucher row", e))?;

        Ok(Page::new(items, total.max(0) as u64, query.page))
    }
}
