//! Persisted voucher log entries.

use serde::Serialize;

use crate::domain::foundation::{TaskId, Timestamp, UserId, VoucherId};

use super::code::VoucherCode;
use super::errors::VoucherImportError;

/// Longest month or week label the voucher log accepts.
pub const MAX_PERIOD_LEN: usize = 10;

/// One issued karma voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherRecord {
    pub id: VoucherId,
    pub code: VoucherCode,
    pub user_id: UserId,
    pub task_id: TaskId,
    pub karma: i64,
    pub month: String,
    pub week: String,
    pub claimed: bool,
    pub created_by: UserId,
    pub updated_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VoucherRecord {
    /// Schema-level checks applied before a record is written.
    pub fn validate(&self) -> Result<(), VoucherImportError> {
        if self.karma == 0 {
            return Err(VoucherImportError::ZeroReward);
        }
        check_period("month", &self.month)?;
        check_period("week", &self.week)?;
        Ok(())
    }
}

/// Rejects a blank or over-long month or week label.
pub(super) fn check_period(field: &str, value: &str) -> Result<(), VoucherImportError> {
    if value.trim().is_empty() {
        return Err(VoucherImportError::schema(field, "this field may not be blank"));
    }
    if value.chars().count() > MAX_PERIOD_LEN {
        return Err(VoucherImportError::schema(
            field,
            format!("ensure this field has no more than {} characters", MAX_PERIOD_LEN),
        ));
    }
    Ok(())
}
