//! Query model for the issued-voucher listing.

use serde::Serialize;

use crate::domain::foundation::{PageRequest, Timestamp, VoucherId};

/// Columns the listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherSortKey {
    User,
    Code,
    Karma,
    Claimed,
    Task,
    Week,
    Month,
    UpdatedBy,
    UpdatedAt,
    CreatedAt,
}

impl VoucherSortKey {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "user" => VoucherSortKey::User,
            "code" => VoucherSortKey::Code,
            "karma" => VoucherSortKey::Karma,
            "claimed" => VoucherSortKey::Claimed,
            "task" => VoucherSortKey::Task,
            "week" => VoucherSortKey::Week,
            "month" => VoucherSortKey::Month,
            "updated_by" => VoucherSortKey::UpdatedBy,
            "updated_at" => VoucherSortKey::UpdatedAt,
            "created_at" => VoucherSortKey::CreatedAt,
            _ => return None,
        })
    }
}

/// Sort order parsed from a `sortBy` value such as `-karma`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherSort {
    pub key: VoucherSortKey,
    pub descending: bool,
}

impl VoucherSort {
    /// A leading `-` means descending. Missing or unknown keys fall back to
    /// newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        let (descending, key) = match raw.strip_prefix('-') {
            Some(key) => (true, key),
            None => (false, raw),
        };
        VoucherSortKey::from_key(key)
            .map(|key| Self { key, descending })
            .unwrap_or_default()
    }
}

impl Default for VoucherSort {
    fn default() -> Self {
        Self {
            key: VoucherSortKey::CreatedAt,
            descending: true,
        }
    }
}

/// Filters for one page of the voucher listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherListQuery {
    /// Case-insensitive substring matched against names, task title, karma,
    /// period and claim state.
    pub search: Option<String>,
    pub sort: VoucherSort,
    pub page: PageRequest,
}

/// One row of the listing, with people and tasks shown by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherListItem {
    pub id: VoucherId,
    pub code: String,
    pub user: String,
    pub task: String,
    pub karma: i64,
    pub month: String,
    pub week: String,
    pub claimed: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
