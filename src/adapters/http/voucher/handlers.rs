//! HTTP handlers for voucher endpoints.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Response};

use crate::adapters::csv::read_sheet;
use crate::adapters::http::envelope::ApiResponse;
use crate::adapters::http::middleware::RequireAdmin;
use crate::application::handlers::voucher::{
    ImportVouchersCommand, ImportVouchersHandler, ListVouchersHandler,
};
use crate::domain::foundation::DomainError;
use crate::domain::voucher::VoucherImportError;
use crate::ports::{TaskCatalog, UserDirectory, VoucherNotifier, VoucherReader, VoucherRepository};

use super::dto::{ImportVouchersResponse, ListVouchersParams, VoucherPageResponse, VOUCHER_FILE_FIELD};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct VoucherAppState {
    pub users: Arc<dyn UserDirectory>,
    pub tasks: Arc<dyn TaskCatalog>,
    pub notifier: Arc<dyn VoucherNotifier>,
    pub repository: Arc<dyn VoucherRepository>,
    pub reader: Arc<dyn VoucherReader>,
}

impl VoucherAppState {
    pub fn import_handler(&self) -> ImportVouchersHandler {
        ImportVouchersHandler::new(
            self.users.clone(),
            self.tasks.clone(),
            self.notifier.clone(),
            self.repository.clone(),
        )
    }

    pub fn list_handler(&self) -> ListVouchersHandler {
        ListVouchersHandler::new(self.reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/dashboard/karma-voucher/import/
pub async fn import_vouchers(
    State(state): State<VoucherAppState>,
    RequireAdmin(user): RequireAdmin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, VoucherApiError> {
    let upload = read_upload(multipart).await?;
    let sheet = read_sheet(&upload)?;

    let cmd = ImportVouchersCommand {
        actor: user.id,
        headers: sheet.headers,
        records: sheet.records,
    };
    let result = state.import_handler().handle(cmd).await?;

    Ok(ApiResponse::success(ImportVouchersResponse::from(result)))
}

/// GET /api/v1/dashboard/karma-voucher/
pub async fn list_vouchers(
    State(state): State<VoucherAppState>,
    RequireAdmin(_user): RequireAdmin,
    Query(params): Query<ListVouchersParams>,
) -> Result<impl IntoResponse, VoucherApiError> {
    let page = state.list_handler().handle(params.into()).await?;
    Ok(ApiResponse::success(VoucherPageResponse::from(page)))
}

/// Returns the bytes of the `voucher_log` field.
///
/// A request that is not multipart, or has no such field, counts as a
/// missing file.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, VoucherImportError> {
    let mut multipart = multipart.map_err(|_| VoucherImportError::MissingFile)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VoucherImportError::MalformedFile(e.body_text()))?
    {
        if field.name() == Some(VOUCHER_FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| VoucherImportError::MalformedFile(e.body_text()))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(VoucherImportError::MissingFile)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum VoucherApiError {
    Import(VoucherImportError),
    Listing(DomainError),
}

impl From<VoucherImportError> for VoucherApiError {
    fn from(err: VoucherImportError) -> Self {
        Self::Import(err)
    }
}

impl From<DomainError> for VoucherApiError {
    fn from(err: DomainError) -> Self {
        Self::Listing(err)
    }
}

impl IntoResponse for VoucherApiError {
    fn into_response(self) -> Response {
        match self {
            VoucherApiError::Import(VoucherImportError::Infrastructure(reason)) => {
                tracing::error!(reason = %reason, "Voucher import aborted");
                ApiResponse::internal().into_response()
            }
            VoucherApiError::Import(err) => ApiResponse::failure(err.to_string()).into_response(),
            VoucherApiError::Listing(err) => {
                tracing::error!(error = %err, "Voucher listing failed");
                ApiResponse::internal().into_response()
            }
        }
    }
}
