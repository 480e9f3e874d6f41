//! Voucher card rendering and delivery.

mod email_notifier;
mod svg_renderer;

pub use email_notifier::{EmailVoucherNotifier, VOUCHER_SUBJECT};
pub use svg_renderer::SvgVoucherRenderer;
