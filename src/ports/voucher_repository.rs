//! Voucher log persistence (write side) and listing (read side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page};
use crate::domain::voucher::{VoucherListItem, VoucherListQuery, VoucherRecord};

/// Repository port for the voucher log.
#[async_trait]
pub trait VoucherRepository: Send + Sync {
    /// Insert all records atomically.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if any insert fails; nothing is written in that case
    async fn insert_batch(&self, records: &[VoucherRecord]) -> Result<(), DomainError>;

    /// Insert one record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, record: &VoucherRecord) -> Result<(), DomainError>;
}

/// Reader port for the admin voucher listing.
#[async_trait]
pub trait VoucherReader: Send + Sync {
    /// One page of vouchers matching the query, plus the total match count.
    async fn list(&self, query: &VoucherListQuery) -> Result<Page<VoucherListItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_ports_are_object_safe() {
        fn _repo(_: &dyn VoucherRepository) {}
        fn _reader(_: &dyn VoucherReader) {}
    }
}
