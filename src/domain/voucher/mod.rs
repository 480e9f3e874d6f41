//! Karma voucher domain.
//!
//! An administrator uploads a sheet of (karma, mail, task, month, week) rows.
//! Each valid row becomes a voucher: a record in the voucher log plus a card
//! emailed to the user, who redeems it by posting the card with the task
//! hashtag.
//!
//! - `import_row` - typed sheet rows and column checks
//! - `enrich` - bulk reference maps and the validation/enrichment pass
//! - `code` - sequential display codes
//! - `record` - the persisted voucher and its schema checks
//! - `notice` - what gets rendered and sent to the recipient
//! - `listing` - sort and filter model for the issued-voucher listing

mod code;
mod enrich;
mod errors;
mod import_row;
mod listing;
mod notice;
mod record;

pub use code::VoucherCode;
pub use enrich::{
    enrich_rows, EnrichedRow, Enrichment, ReferenceKeys, ResolvedReferences, TaskRef, UserRef,
};
pub use errors::VoucherImportError;
pub use import_row::{
    rows_from_sheet, FailedRow, ImportRow, KARMA_COLUMN, MAIL_COLUMN, MONTH_COLUMN,
    REQUIRED_COLUMNS, TASK_COLUMN, WEEK_COLUMN,
};
pub use listing::{VoucherListItem, VoucherListQuery, VoucherSort, VoucherSortKey};
pub use notice::VoucherNotice;
pub use record::{VoucherRecord, MAX_PERIOD_LEN};
