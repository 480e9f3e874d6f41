//! Voucher delivery ports.
//!
//! `VoucherRenderer` draws the card, `VoucherNotifier` gets it to the
//! recipient. Keeping delivery behind a port lets it move to a queue without
//! touching the import pipeline.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voucher::VoucherNotice;

use super::email_sender::EmailError;

/// A rendered voucher card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherCard {
    pub content_type: &'static str,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("could not render voucher card: {0}")]
    Render(String),

    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Renders the card image for a voucher.
pub trait VoucherRenderer: Send + Sync {
    fn render(&self, notice: &VoucherNotice) -> Result<VoucherCard, NotifyError>;
}

/// Delivers a voucher to its recipient.
#[async_trait]
pub trait VoucherNotifier: Send + Sync {
    async fn notify(&self, notice: &VoucherNotice) -> Result<(), NotifyError>;
}
