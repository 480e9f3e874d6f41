//! Typed rows of an uploaded voucher sheet.

use std::collections::BTreeMap;

use serde::Serialize;

use super::errors::VoucherImportError;

pub const KARMA_COLUMN: &str = "karma";
pub const MAIL_COLUMN: &str = "mail";
pub const TASK_COLUMN: &str = "task";
pub const MONTH_COLUMN: &str = "month";
pub const WEEK_COLUMN: &str = "week";

/// Columns every voucher sheet must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    KARMA_COLUMN,
    MAIL_COLUMN,
    TASK_COLUMN,
    MONTH_COLUMN,
    WEEK_COLUMN,
];

/// One data line of the sheet.
///
/// The typed fields are read from the required columns; `columns` keeps the
/// line exactly as uploaded so it can be echoed back on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based position among data lines.
    pub line: usize,
    pub task_reference: String,
    pub reward_amount: String,
    pub user_email: String,
    pub period_month: String,
    pub period_week: String,
    columns: BTreeMap<String, String>,
}

impl ImportRow {
    fn from_columns(line: usize, columns: BTreeMap<String, String>) -> Self {
        let get = |key: &str| columns.get(key).cloned().unwrap_or_default();
        Self {
            line,
            task_reference: get(TASK_COLUMN),
            reward_amount: get(KARMA_COLUMN),
            user_email: get(MAIL_COLUMN),
            period_month: get(MONTH_COLUMN),
            period_week: get(WEEK_COLUMN),
            columns,
        }
    }

    pub fn columns(&self) -> &BTreeMap<String, String> {
        &self.columns
    }

    /// Parses the karma cell as a whole number.
    ///
    /// Spreadsheet exports often write integers as `10.0`, so integral floats
    /// are accepted too.
    pub fn karma(&self) -> Result<i64, VoucherImportError> {
        let raw = self.reward_amount.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return Ok(value);
        }
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        match raw.parse::<f64>() {
            Ok(value)
                if value.fract() == 0.0
                    && value >= i64::MIN as f64
                    && value < i64::MAX as f64 =>
            {
                Ok(value as i64)
            }
            _ => Err(VoucherImportError::InvalidKarma(self.reward_amount.clone())),
        }
    }

    /// `"month/week"` as printed on the voucher card.
    pub fn month_week(&self) -> String {
        format!("{}/{}", self.period_month, self.period_week)
    }

    /// Marks this row as rejected.
    pub fn fail(self, error: &VoucherImportError) -> FailedRow {
        FailedRow {
            columns: self.columns,
            error: error.to_string(),
        }
    }
}

/// A rejected row: the uploaded columns plus an `error` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRow {
    #[serde(flatten)]
    pub columns: BTreeMap<String, String>,
    pub error: String,
}

/// Builds typed rows from a parsed sheet.
///
/// Headers and cells are trimmed. Short lines are padded with empty cells.
///
/// # Errors
///
/// - `EmptyFile` if there are no data lines
/// - `MissingColumn` naming the first required column absent from the header
pub fn rows_from_sheet(
    headers: &[String],
    records: Vec<Vec<String>>,
) -> Result<Vec<ImportRow>, VoucherImportError> {
    let records: Vec<Vec<String>> = records
        .into_iter()
        .filter(|record| record.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    if records.is_empty() {
        return Err(VoucherImportError::EmptyFile);
    }

    let headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(VoucherImportError::MissingColumn(column.to_string()));
        }
    }

    let rows = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let columns = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(i, header)| {
                    let cell = record.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
                    (header.clone(), cell)
                })
                .collect();
            ImportRow::from_columns(index + 1, columns)
        })
        .collect();

    Ok(rows)
}
