//! Karma voucher command and query handlers.

mod import_vouchers;
mod list_vouchers;

pub use import_vouchers::{ImportVouchersCommand, ImportVouchersHandler, ImportVouchersResult};
pub use list_vouchers::{ListVouchersHandler, ListVouchersQuery};
