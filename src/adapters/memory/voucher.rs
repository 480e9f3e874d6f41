//! In-memory users, tasks and voucher log.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Page, TaskId, UserId};
use crate::domain::voucher::{
    TaskRef, UserRef, VoucherListItem, VoucherListQuery, VoucherRecord, VoucherSortKey,
};
use crate::ports::{TaskCatalog, UserDirectory, VoucherReader, VoucherRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<UserRef>>>,
}

impl InMemoryUserDirectory {
    pub fn with(users: Vec<UserRef>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    async fn name_of(&self, id: &UserId) -> String {
        self.users
            .read()
            .await
            .iter()
            .find(|u| &u.id == id)
            .map(UserRef::full_name)
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<UserRef>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| emails.contains(&u.email))
            .cloned()
            .collect())
    }
}

/// Tasks, titled by their hashtag.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCatalog {
    tasks: Arc<RwLock<Vec<TaskRef>>>,
}

impl InMemoryTaskCatalog {
    pub fn with(tasks: Vec<TaskRef>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    async fn title_of(&self, id: &TaskId) -> String {
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.hashtag.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskCatalog for InMemoryTaskCatalog {
    async fn find_by_hashtags(&self, hashtags: &[String]) -> Result<Vec<TaskRef>, DomainError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| hashtags.contains(&t.hashtag))
            .cloned()
            .collect())
    }
}

/// Voucher log. Listing resolves names through the directory and catalog.
#[derive(Debug, Clone)]
pub struct InMemoryVoucherRepository {
    users: Arc<InMemoryUserDirectory>,
    tasks: Arc<InMemoryTaskCatalog>,
    records: Arc<RwLock<Vec<VoucherRecord>>>,
    fail_batches: bool,
}

impl InMemoryVoucherRepository {
    pub fn new(users: Arc<InMemoryUserDirectory>, tasks: Arc<InMemoryTaskCatalog>) -> Self {
        Self {
            users,
            tasks,
            records: Arc::default(),
            fail_batches: false,
        }
    }

    /// Makes every `insert_batch` fail, to exercise the per-row fallback.
    pub fn failing_batches(mut self) -> Self {
        self.fail_batches = true;
        self
    }

    pub async fn records(&self) -> Vec<VoucherRecord> {
        self.records.read().await.clone()
    }

    async fn to_item(&self, record: &VoucherRecord) -> VoucherListItem {
        VoucherListItem {
            id: record.id,
            code: record.code.to_string(),
            user: self.users.name_of(&record.user_id).await,
            task: self.tasks.title_of(&record.task_id).await,
            karma: record.karma,
            month: record.month.clone(),
            week: record.week.clone(),
            claimed: record.claimed,
            created_by: self.users.name_of(&record.created_by).await,
            updated_by: self.users.name_of(&record.updated_by).await,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl VoucherRepository for InMemoryVoucherRepository {
    async fn insert_batch(&self, records: &[VoucherRecord]) -> Result<(), DomainError> {
        if self.fail_batches {
            return Err(DomainError::new(ErrorCode::DatabaseError, "batch insert disabled"));
        }
        self.records.write().await.extend_from_slice(records);
        Ok(())
    }

    async fn insert(&self, record: &VoucherRecord) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl VoucherReader for InMemoryVoucherRepository {
    async fn list(&self, query: &VoucherListQuery) -> Result<Page<VoucherListItem>, DomainError> {
        let records = self.records.read().await.clone();
        let mut items = Vec::with_capacity(records.len());
        for record in &records {
            items.push(self.to_item(record).await);
        }

        if let Some(needle) = query.search.as_deref().map(str::to_lowercase) {
            items.retain(|item| matches_search(item, &needle));
        }

        items.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort.key);
            if query.sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let total = items.len() as u64;
        let page = query.page;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = items
            .into_iter()
            .skip(offset)
            .take(page.per_page() as usize)
            .collect();

        Ok(Page::new(items, total, page))
    }
}

fn matches_search(item: &VoucherListItem, needle: &str) -> bool {
    let karma = item.karma.to_string();
    let claimed = item.claimed.to_string();
    [
        item.user.as_str(),
        item.task.as_str(),
        karma.as_str(),
        item.month.as_str(),
        item.week.as_str(),
        claimed.as_str(),
        item.created_by.as_str(),
        item.updated_by.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn compare(a: &VoucherListItem, b: &VoucherListItem, key: VoucherSortKey) -> Ordering {
    match key {
        VoucherSortKey::User => a.user.cmp(&b.user),
        VoucherSortKey::Code => a.code.cmp(&b.code),
        VoucherSortKey::Karma => a.karma.cmp(&b.karma),
        VoucherSortKey::Claimed => a.claimed.cmp(&b.claimed),
        VoucherSortKey::Task => a.task.cmp(&b.task),
        VoucherSortKey::Week => a.week.cmp(&b.week),
        VoucherSortKey::Month => a.month.cmp(&b.month),
        VoucherSortKey::UpdatedBy => a.updated_by.cmp(&b.updated_by),
        VoucherSortKey::UpdatedAt => a.updated_at.as_datetime().cmp(b.updated_at.as_datetime()),
        VoucherSortKey::CreatedAt => a.created_at.as_datetime().cmp(b.created_at.as_datetime()),
    }
}
