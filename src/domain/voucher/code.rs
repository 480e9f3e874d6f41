//! Sequential voucher codes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Width of the zero-padded display form.
const CODE_WIDTH: usize = 6;

/// Human-readable code printed on a voucher card.
///
/// Codes are derived from the position of a row among the valid rows of one
/// import, starting at 1, so they are strictly increasing within a batch.
/// The display form is zero-padded (`000001`) and sorts the same way as the
/// sequence for batches below one million rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoucherCode(u32);

impl VoucherCode {
    /// First code of every batch.
    pub const FIRST: VoucherCode = VoucherCode(1);

    /// Builds the code for a 1-based position among valid rows.
    pub fn from_sequence(sequence: u32) -> Self {
        Self(sequence.max(1))
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }

    /// The code that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = CODE_WIDTH)
    }
}

impl Serialize for VoucherCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_code_is_one() {
        assert_eq!(VoucherCode::FIRST.sequence(), 1);
        assert_eq!(VoucherCode::FIRST.to_string(), "000001");
    }

    #[test]
    fn code_serializes_as_display_string() {
        let json = serde_json::to_string(&VoucherCode::from_sequence(42)).unwrap();
        assert_eq!(json, r#""000042""#);
    }

    proptest! {
        #[test]
        fn next_is_strictly_greater(n in 1u32..u32::MAX) {
            let code = VoucherCode::from_sequence(n);
            prop_assert!(code.next() > code);
            prop_assert_eq!(code.next().sequence(), n + 1);
        }

        #[test]
        fn display_order_follows_sequence(a in 1u32..999_999, b in 1u32..999_999) {
            let (ca, cb) = (VoucherCode::from_sequence(a), VoucherCode::from_sequence(b));
            prop_assert_eq!(a.cmp(&b), ca.to_string().cmp(&cb.to_string()));
        }
    }
}
