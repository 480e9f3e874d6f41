//! Row validation and enrichment.
//!
//! Pure computation over in-memory rows: resolves each row against the bulk
//! lookup maps, rejects bad rows, and stamps valid ones with an id, a
//! sequential code and audit fields. Nothing here touches storage.

use std::collections::{BTreeSet, HashMap};

use crate::domain::foundation::{TaskId, Timestamp, UserId, VoucherId};

use super::code::VoucherCode;
use super::errors::VoucherImportError;
use super::import_row::{FailedRow, ImportRow};
use super::record::{check_period, VoucherRecord};

/// User projection loaded by the bulk lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl UserRef {
    /// Name printed on the voucher card and used in the email body.
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Task projection loaded by the bulk lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub id: TaskId,
    pub hashtag: String,
}

/// Distinct natural keys referenced by a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceKeys {
    pub emails: Vec<String>,
    pub hashtags: Vec<String>,
}

impl ReferenceKeys {
    pub fn collect(rows: &[ImportRow]) -> Self {
        let emails: BTreeSet<&str> = rows.iter().map(|r| r.user_email.as_str()).collect();
        let hashtags: BTreeSet<&str> = rows.iter().map(|r| r.task_reference.as_str()).collect();
        Self {
            emails: emails.into_iter().map(str::to_string).collect(),
            hashtags: hashtags.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Lookup maps built from one bulk query per entity type.
#[derive(Debug, Clone, Default)]
pub struct ResolvedReferences {
    users: HashMap<String, (UserId, String)>,
    tasks: HashMap<String, TaskId>,
}

impl ResolvedReferences {
    pub fn new(users: Vec<UserRef>, tasks: Vec<TaskRef>) -> Self {
        let users = users
            .into_iter()
            .map(|u| {
                let name = u.full_name();
                (u.email, (u.id, name))
            })
            .collect();
        let tasks = tasks.into_iter().map(|t| (t.hashtag, t.id)).collect();
        Self { users, tasks }
    }

    pub fn user(&self, email: &str) -> Option<&(UserId, String)> {
        self.users.get(email)
    }

    pub fn task(&self, hashtag: &str) -> Option<&TaskId> {
        self.tasks.get(hashtag)
    }
}

/// A row that passed validation, with every derived field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRow {
    pub row: ImportRow,
    pub user_id: UserId,
    pub user_name: String,
    pub task_id: TaskId,
    pub karma: i64,
    pub unique_id: VoucherId,
    pub code: VoucherCode,
    pub claimed: bool,
    pub created_by: UserId,
    pub updated_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EnrichedRow {
    pub fn to_record(&self) -> VoucherRecord {
        VoucherRecord {
            id: self.unique_id,
            code: self.code,
            user_id: self.user_id.clone(),
            task_id: self.task_id.clone(),
            karma: self.karma,
            month: self.row.period_month.clone(),
            week: self.row.period_week.clone(),
            claimed: self.claimed,
            created_by: self.created_by.clone(),
            updated_by: self.updated_by.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn fail(self, error: &VoucherImportError) -> FailedRow {
        self.row.fail(error)
    }
}

/// Result of the validation pass: valid rows and rejected rows, each in
/// upload order.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub valid: Vec<EnrichedRow>,
    pub failed: Vec<FailedRow>,
}

/// Validates and enriches rows in upload order.
///
/// Checks run in a fixed order: user, task, karma, month, week. Only rows
/// that pass all checks consume a code, so codes run 1..=n over the valid
/// rows.
pub fn enrich_rows(
    rows: Vec<ImportRow>,
    references: &ResolvedReferences,
    actor: &UserId,
    now: Timestamp,
) -> Enrichment {
    let mut enrichment = Enrichment::default();
    let mut next_code = VoucherCode::FIRST;

    for row in rows {
        match resolve(&row, references) {
            Ok((user_id, user_name, task_id, karma)) => {
                enrichment.valid.push(EnrichedRow {
                    row,
                    user_id,
                    user_name,
                    task_id,
                    karma,
                    unique_id: VoucherId::new(),
                    code: next_code,
                    claimed: false,
                    created_by: actor.clone(),
                    updated_by: actor.clone(),
                    created_at: now,
                    updated_at: now,
                });
                next_code = next_code.next();
            }
            Err(err) => enrichment.failed.push(row.fail(&err)),
        }
    }

    enrichment
}

fn resolve(
    row: &ImportRow,
    references: &ResolvedReferences,
) -> Result<(UserId, String, TaskId, i64), VoucherImportError> {
    let (user_id, user_name) = references
        .user(&row.user_email)
        .ok_or_else(|| VoucherImportError::InvalidUser(row.user_email.clone()))?;
    let task_id = references
        .task(&row.task_reference)
        .ok_or_else(|| VoucherImportError::InvalidTask(row.task_reference.clone()))?;
    let karma = row.karma()?;
    if karma == 0 {
        return Err(VoucherImportError::ZeroReward);
    }
    check_period("month", &row.period_month)?;
    check_period("week", &row.period_week)?;
    Ok((user_id.clone(), user_name.clone(), task_id.clone(), karma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voucher::import_row::{rows_from_sheet, REQUIRED_COLUMNS};

    fn sheet(lines: &[[&str; 5]]) -> Vec<ImportRow> {
        let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let records = lines
            .iter()
            .map(|l| l.iter().map(|c| c.to_string()).collect())
            .collect();
        rows_from_sheet(&headers, records).unwrap()
    }

    fn references() -> ResolvedReferences {
        ResolvedReferences::new(
            vec![
                UserRef {
                    id: UserId::new("u-1").unwrap(),
                    email: "ann@x.org".to_string(),
                    first_name: "Ann".to_string(),
                    last_name: Some("Lee".to_string()),
                },
                UserRef {
                    id: UserId::new("u-2").unwrap(),
                    email: "bo@x.org".to_string(),
                    first_name: "Bo".to_string(),
                    last_name: None,
                },
            ],
            vec![TaskRef {
                id: TaskId::new("t-1").unwrap(),
                hashtag: "#cl-web".to_string(),
            }],
        )
    }

    fn actor() -> UserId {
        UserId::new("admin").unwrap()
    }

    #[test]
    fn full_name_skips_missing_last_name() {
        let refs = references();
        assert_eq!(refs.user("ann@x.org").unwrap().1, "Ann Lee");
        assert_eq!(refs.user("bo@x.org").unwrap().1, "Bo");
    }

    #[test]
    fn reference_keys_are_distinct() {
        let rows = sheet(&[
            ["1", "ann@x.org", "#cl-web", "Jan", "1"],
            ["2", "ann@x.org", "#cl-web", "Jan", "2"],
            ["3", "bo@x.org", "#other", "Jan", "3"],
        ]);
        let keys = ReferenceKeys::collect(&rows);
        assert_eq!(keys.emails, vec!["ann@x.org", "bo@x.org"]);
        assert_eq!(keys.hashtags, vec!["#cl-web", "#other"]);
    }

    #[test]
    fn mixed_batch_partitions_rows() {
        let rows = sheet(&[
            ["10", "ann@x.org", "#cl-web", "Jan", "1"],
            ["10", "ghost@x.org", "#cl-web", "Jan", "1"],
            ["0", "bo@x.org", "#cl-web", "Jan", "1"],
        ]);
        let now = Timestamp::now();
        let result = enrich_rows(rows, &references(), &actor(), now);

        assert_eq!(result.valid.len(), 1);
        let valid = &result.valid[0];
        assert_eq!(valid.code, VoucherCode::FIRST);
        assert_eq!(valid.user_name, "Ann Lee");
        assert!(!valid.claimed);
        assert_eq!(valid.created_by, actor());
        assert_eq!(valid.created_at, now);
        assert_eq!(valid.updated_at, now);

        assert_eq!(result.failed.len(), 2);
        assert_eq!(result.failed[0].error, "Invalid email: ghost@x.org");
        assert_eq!(result.failed[1].error, "Karma cannot be 0");
    }

    #[test]
    fn unknown_task_is_checked_after_user() {
        let rows = sheet(&[
            ["5", "ann@x.org", "#nope", "Jan", "1"],
            ["5", "ghost@x.org", "#nope", "Jan", "1"],
        ]);
        let result = enrich_rows(rows, &references(), &actor(), Timestamp::now());
        assert_eq!(result.failed[0].error, "Invalid task hashtag: #nope");
        assert_eq!(result.failed[1].error, "Invalid email: ghost@x.org");
    }

    #[test]
    fn failed_rows_do_not_consume_codes() {
        let rows = sheet(&[
            ["0", "ann@x.org", "#cl-web", "Jan", "1"],
            ["1", "ann@x.org", "#cl-web", "Jan", "1"],
            ["1", "ghost@x.org", "#cl-web", "Jan", "1"],
            ["2", "bo@x.org", "#cl-web", "Jan", "2"],
            ["3", "bo@x.org", "#cl-web", "Jan", "3"],
        ]);
        let result = enrich_rows(rows, &references(), &actor(), Timestamp::now());
        let codes: Vec<u32> = result.valid.iter().map(|r| r.code.sequence()).collect();
        assert_eq!(codes, vec![1, 2, 3]);
    }

    #[test]
    fn period_failures_do_not_consume_codes() {
        let rows = sheet(&[
            ["10", "ann@x.org", "#cl-web", "", "1"],
            ["7", "bo@x.org", "#cl-web", "Jan", "September-2024"],
            ["7", "bo@x.org", "#cl-web", "Jan", "2"],
        ]);
        let result = enrich_rows(rows, &references(), &actor(), Timestamp::now());

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].code, VoucherCode::FIRST);
        assert_eq!(result.failed[0].error, "Invalid month: this field may not be blank");
        assert!(result.failed[1].error.starts_with("Invalid week: "));
    }

    #[test]
    fn unique_ids_are_distinct() {
        let rows = sheet(&[
            ["1", "ann@x.org", "#cl-web", "Jan", "1"],
            ["1", "ann@x.org", "#cl-web", "Jan", "1"],
        ]);
        let result = enrich_rows(rows, &references(), &actor(), Timestamp::now());
        assert_ne!(result.valid[0].unique_id, result.valid[1].unique_id);
    }

    #[test]
    fn record_carries_row_period() {
        let rows = sheet(&[["7", "bo@x.org", "#cl-web", "March", "4"]]);
        let result = enrich_rows(rows, &references(), &actor(), Timestamp::now());
        let record = result.valid[0].to_record();
        assert_eq!(record.karma, 7);
        assert_eq!(record.month, "March");
        assert_eq!(record.week, "4");
        assert_eq!(record.user_id.as_str(), "u-2");
    }
}
