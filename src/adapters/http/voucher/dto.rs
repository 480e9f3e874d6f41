//! Request and response shapes for voucher endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::voucher::{ImportVouchersResult, ListVouchersQuery};
use crate::domain::foundation::{Page, Pagination};
use crate::domain::voucher::{FailedRow, VoucherListItem, VoucherRecord};

/// Multipart field carrying the voucher sheet.
pub const VOUCHER_FILE_FIELD: &str = "voucher_log";

/// Query string of the voucher listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVouchersParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page_index: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<ListVouchersParams> for ListVouchersQuery {
    fn from(params: ListVouchersParams) -> Self {
        ListVouchersQuery {
            search: params.search,
            sort_by: params.sort_by,
            page_index: params.page_index,
            per_page: params.per_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportVouchersResponse {
    #[serde(rename = "Success")]
    pub success: Vec<VoucherRecord>,
    #[serde(rename = "Failed")]
    pub failed: Vec<FailedRow>,
}

impl From<ImportVouchersResult> for ImportVouchersResponse {
    fn from(result: ImportVouchersResult) -> Self {
        Self {
            success: result.success,
            failed: result.failed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoucherPageResponse {
    pub data: Vec<VoucherListItem>,
    pub pagination: Pagination,
}

impl From<Page<VoucherListItem>> for VoucherPageResponse {
    fn from(page: Page<VoucherListItem>) -> Self {
        let pagination = page.pagination();
        Self {
            data: page.items,
            pagination,
        }
    }
}
