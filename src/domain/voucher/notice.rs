//! What a voucher recipient is told.

use super::code::VoucherCode;
use super::enrich::EnrichedRow;

/// Everything needed to render and deliver one voucher card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherNotice {
    pub recipient_email: String,
    pub recipient_name: String,
    pub karma: i64,
    pub code: VoucherCode,
    pub hashtag: String,
    /// `"month/week"` label.
    pub period: String,
}

impl From<&EnrichedRow> for VoucherNotice {
    fn from(row: &EnrichedRow) -> Self {
        Self {
            recipient_email: row.row.user_email.clone(),
            recipient_name: row.user_name.clone(),
            karma: row.karma,
            code: row.code,
            hashtag: row.row.task_reference.clone(),
            period: row.row.month_week(),
        }
    }
}
