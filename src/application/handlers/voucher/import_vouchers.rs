//! ImportVouchersHandler - Command handler for bulk karma voucher imports.
//!
//! Pipeline, in order:
//! 1. Build typed rows from the parsed sheet (structural checks)
//! 2. Resolve every email and hashtag with one lookup each
//! 3. Validate and enrich rows, assigning codes to valid rows only
//! 4. Schema-check the resulting records
//! 5. Deliver each voucher card; delivery failures drop the row
//! 6. Batch insert, falling back to per-row inserts if the batch fails

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::voucher::{
    enrich_rows, rows_from_sheet, EnrichedRow, Enrichment, FailedRow, ReferenceKeys,
    ResolvedReferences, VoucherImportError, VoucherNotice, VoucherRecord,
};
use crate::ports::{TaskCatalog, UserDirectory, VoucherNotifier, VoucherRepository};

/// Command to import one uploaded voucher sheet.
#[derive(Debug, Clone)]
pub struct ImportVouchersCommand {
    /// The importing administrator, recorded as creator and updater.
    pub actor: UserId,
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Outcome of an import: saved vouchers and rejected rows, each in upload
/// order within its stage.
#[derive(Debug, Clone, Default)]
pub struct ImportVouchersResult {
    pub success: Vec<VoucherRecord>,
    pub failed: Vec<FailedRow>,
}

/// Handler for voucher imports.
pub struct ImportVouchersHandler {
    users: Arc<dyn UserDirectory>,
    tasks: Arc<dyn TaskCatalog>,
    notifier: Arc<dyn VoucherNotifier>,
    repository: Arc<dyn VoucherRepository>,
}

impl ImportVouchersHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        tasks: Arc<dyn TaskCatalog>,
        notifier: Arc<dyn VoucherNotifier>,
        repository: Arc<dyn VoucherRepository>,
    ) -> Self {
        Self {
            users,
            tasks,
            notifier,
            repository,
        }
    }

    /// Runs the import.
    ///
    /// # Errors
    ///
    /// Only structural problems (`EmptyFile`, `MissingColumn`) and lookup
    /// failures are returned as errors. Row problems end up in `failed`.
    pub async fn handle(
        &self,
        cmd: ImportVouchersCommand,
    ) -> Result<ImportVouchersResult, VoucherImportError> {
        let rows = rows_from_sheet(&cmd.headers, cmd.records)?;
        let total = rows.len();
        let now = Timestamp::now();

        let keys = ReferenceKeys::collect(&rows);
        let users = self.users.find_by_emails(&keys.emails).await?;
        let tasks = self.tasks.find_by_hashtags(&keys.hashtags).await?;
        let references = ResolvedReferences::new(users, tasks);

        let Enrichment { valid, mut failed } = enrich_rows(rows, &references, &cmd.actor, now);

        let checked = schema_check(valid, &mut failed);
        let delivered = self.deliver(checked, &mut failed).await;
        let success = self.persist(delivered, &mut failed).await;

        info!(
            actor = %cmd.actor,
            rows = total,
            saved = success.len(),
            failed = failed.len(),
            "Voucher import finished"
        );

        Ok(ImportVouchersResult { success, failed })
    }

    async fn deliver(
        &self,
        rows: Vec<(EnrichedRow, VoucherRecord)>,
        failed: &mut Vec<FailedRow>,
    ) -> Vec<(EnrichedRow, VoucherRecord)> {
        let mut delivered = Vec::with_capacity(rows.len());
        for (row, record) in rows {
            let notice = VoucherNotice::from(&row);
            match self.notifier.notify(&notice).await {
                Ok(()) => delivered.push((row, record)),
                Err(err) => {
                    warn!(line = row.row.line, code = %record.code, error = %err, "Voucher email not sent");
                    failed.push(row.fail(&VoucherImportError::EmailDispatchFailed(err.to_string())));
                }
            }
        }
        delivered
    }

    async fn persist(
        &self,
        rows: Vec<(EnrichedRow, VoucherRecord)>,
        failed: &mut Vec<FailedRow>,
    ) -> Vec<VoucherRecord> {
        if rows.is_empty() {
            return Vec::new();
        }

        let records: Vec<VoucherRecord> = rows.iter().map(|(_, record)| record.clone()).collect();
        let batch_error = match self.repository.insert_batch(&records).await {
            Ok(()) => return records,
            Err(err) => err,
        };
        warn!(error = %batch_error, count = records.len(), "Voucher batch insert failed, retrying per row");

        let mut saved = Vec::with_capacity(rows.len());
        for (row, record) in rows {
            match self.repository.insert(&record).await {
                Ok(()) => saved.push(record),
                Err(err) => {
                    warn!(line = row.row.line, code = %record.code, error = %err, "Voucher insert failed");
                    failed.push(row.fail(&VoucherImportError::PersistenceFailed(err.message)));
                }
            }
        }
        saved
    }
}

fn schema_check(
    rows: Vec<EnrichedRow>,
    failed: &mut Vec<FailedRow>,
) -> Vec<(EnrichedRow, VoucherRecord)> {
    let mut checked = Vec::with_capacity(rows.len());
    for row in rows {
        let record = row.to_record();
        match record.validate() {
            Ok(()) => checked.push((row, record)),
            Err(err) => failed.push(row.fail(&err)),
        }
    }
    checked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, TaskId};
    use crate::domain::voucher::{TaskRef, UserRef, VoucherCode, REQUIRED_COLUMNS};
    use crate::ports::{EmailError, NotifyError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockUserDirectory {
        users: Vec<UserRef>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MockUserDirectory {
        fn with(users: Vec<UserRef>) -> Self {
            Self {
                users,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<UserRef>, DomainError> {
            self.calls.lock().unwrap().push(emails.to_vec());
            Ok(self
                .users
                .iter()
                .filter(|u| emails.contains(&u.email))
                .cloned()
                .collect())
        }
    }

    struct MockTaskCatalog {
        tasks: Vec<TaskRef>,
        calls: Mutex<usize>,
    }

    impl MockTaskCatalog {
        fn with(tasks: Vec<TaskRef>) -> Self {
            Self {
                tasks,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl TaskCatalog for MockTaskCatalog {
        async fn find_by_hashtags(&self, hashtags: &[String]) -> Result<Vec<TaskRef>, DomainError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self
                .tasks
                .iter()
                .filter(|t| hashtags.contains(&t.hashtag))
                .cloned()
                .collect())
        }
    }

    struct MockNotifier {
        sent: Mutex<Vec<VoucherNotice>>,
        fail_for: Option<String>,
    }

    impl MockNotifier {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(email: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: Some(email.to_string()),
            }
        }

        fn sent(&self) -> Vec<VoucherNotice> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VoucherNotifier for MockNotifier {
        async fn notify(&self, notice: &VoucherNotice) -> Result<(), NotifyError> {
            if self.fail_for.as_deref() == Some(notice.recipient_email.as_str()) {
                return Err(EmailError::Transport("connection reset".to_string()).into());
            }
            self.sent.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    struct MockVoucherRepository {
        saved: Mutex<Vec<VoucherRecord>>,
        batch_calls: Mutex<usize>,
        fail_batch: bool,
        reject_code: Option<u32>,
    }

    impl MockVoucherRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                batch_calls: Mutex::new(0),
                fail_batch: false,
                reject_code: None,
            }
        }

        fn failing_batch_rejecting(code: u32) -> Self {
            Self {
                fail_batch: true,
                reject_code: Some(code),
                ..Self::new()
            }
        }

        fn saved(&self) -> Vec<VoucherRecord> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VoucherRepository for MockVoucherRepository {
        async fn insert_batch(&self, records: &[VoucherRecord]) -> Result<(), DomainError> {
            *self.batch_calls.lock().unwrap() += 1;
            if self.fail_batch {
                return Err(DomainError::new(ErrorCode::DatabaseError, "batch rejected"));
            }
            self.saved.lock().unwrap().extend_from_slice(records);
            Ok(())
        }

        async fn insert(&self, record: &VoucherRecord) -> Result<(), DomainError> {
            if self.reject_code == Some(record.code.sequence()) {
                return Err(DomainError::new(ErrorCode::DatabaseError, "duplicate key"));
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn user(id: &str, email: &str, first: &str, last: Option<&str>) -> UserRef {
        UserRef {
            id: UserId::new(id).unwrap(),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
        }
    }

    fn task(id: &str, hashtag: &str) -> TaskRef {
        TaskRef {
            id: TaskId::new(id).unwrap(),
            hashtag: hashtag.to_string(),
        }
    }

    fn command(lines: &[[&str; 5]]) -> ImportVouchersCommand {
        ImportVouchersCommand {
            actor: UserId::new("admin-1").unwrap(),
            headers: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records: lines
                .iter()
                .map(|l| l.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn directory() -> Arc<MockUserDirectory> {
        Arc::new(MockUserDirectory::with(vec![
            user("u-a", "a@x.org", "Asha", Some("Menon")),
            user("u-b", "b@x.org", "Bilal", None),
        ]))
    }

    fn catalog() -> Arc<MockTaskCatalog> {
        Arc::new(MockTaskCatalog::with(vec![task("t-1", "#t1")]))
    }

    fn handler(
        users: Arc<MockUserDirectory>,
        tasks: Arc<MockTaskCatalog>,
        notifier: Arc<MockNotifier>,
        repository: Arc<MockVoucherRepository>,
    ) -> ImportVouchersHandler {
        ImportVouchersHandler::new(users, tasks, notifier, repository)
    }

    #[tokio::test]
    async fn partitions_rows_and_numbers_valid_ones() {
        let notifier = Arc::new(MockNotifier::new());
        let repository = Arc::new(MockVoucherRepository::new());
        let handler = handler(directory(), catalog(), notifier.clone(), repository.clone());

        let result = handler
            .handle(command(&[
                ["10", "a@x.org", "#t1", "Jan", "1"],
                ["5", "z@x.org", "#t1", "Jan", "1"],
                ["0", "b@x.org", "#t1", "Jan", "2"],
                ["7", "b@x.org", "#t1", "Jan", "2"],
            ]))
            .await
            .unwrap();

        assert_eq!(result.success.len(), 2);
        assert_eq!(result.success[0].code, VoucherCode::from_sequence(1));
        assert_eq!(result.success[1].code, VoucherCode::from_sequence(2));
        assert_eq!(result.success[1].user_id.as_str(), "u-b");

        let errors: Vec<&str> = result.failed.iter().map(|f| f.error.as_str()).collect();
        assert_eq!(errors, vec!["Invalid email: z@x.org", "Karma cannot be 0"]);

        assert_eq!(repository.saved().len(), 2);
        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].recipient_name, "Asha Menon");
        assert_eq!(sent[0].period, "Jan/1");
    }

    #[tokio::test]
    async fn resolves_references_with_one_lookup_each() {
        let users = directory();
        let tasks = catalog();
        let handler = handler(
            users.clone(),
            tasks.clone(),
            Arc::new(MockNotifier::new()),
            Arc::new(MockVoucherRepository::new()),
        );

        handler
            .handle(command(&[
                ["1", "a@x.org", "#t1", "Jan", "1"],
                ["2", "a@x.org", "#t1", "Jan", "1"],
                ["3", "b@x.org", "#t1", "Jan", "1"],
            ]))
            .await
            .unwrap();

        let calls = users.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![vec!["a@x.org".to_string(), "b@x.org".to_string()]]);
        assert_eq!(*tasks.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_delivery_drops_row_but_keeps_others() {
        let repository = Arc::new(MockVoucherRepository::new());
        let handler = handler(
            directory(),
            catalog(),
            Arc::new(MockNotifier::failing_for("a@x.org")),
            repository.clone(),
        );

        let result = handler
            .handle(command(&[
                ["10", "a@x.org", "#t1", "Jan", "1"],
                ["7", "b@x.org", "#t1", "Jan", "2"],
            ]))
            .await
            .unwrap();

        assert_eq!(result.success.len(), 1);
        assert_eq!(result.success[0].user_id.as_str(), "u-b");
        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0]
            .error
            .starts_with("Failed to send voucher email: "));
        assert_eq!(result.failed[0].columns["mail"], "a@x.org");
        assert_eq!(repository.saved().len(), 1);
    }

    #[tokio::test]
    async fn period_failures_are_not_emailed_and_keep_codes_dense() {
        let notifier = Arc::new(MockNotifier::new());
        let handler = handler(
            directory(),
            catalog(),
            notifier.clone(),
            Arc::new(MockVoucherRepository::new()),
        );

        let result = handler
            .handle(command(&[
                ["10", "a@x.org", "#t1", "", "1"],
                ["7", "b@x.org", "#t1", "Jan", "2"],
            ]))
            .await
            .unwrap();

        assert_eq!(result.success.len(), 1);
        assert_eq!(result.success[0].code, VoucherCode::FIRST);
        assert_eq!(result.failed[0].error, "Invalid month: this field may not be blank");
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn batch_failure_falls_back_to_row_inserts() {
        let repository = Arc::new(MockVoucherRepository::failing_batch_rejecting(2));
        let handler = handler(
            directory(),
            catalog(),
            Arc::new(MockNotifier::new()),
            repository.clone(),
        );

        let result = handler
            .handle(command(&[
                ["10", "a@x.org", "#t1", "Jan", "1"],
                ["7", "b@x.org", "#t1", "Jan", "2"],
            ]))
            .await
            .unwrap();

        assert_eq!(*repository.batch_calls.lock().unwrap(), 1);
        assert_eq!(result.success.len(), 1);
        assert_eq!(result.success[0].code, VoucherCode::from_sequence(1));
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].error, "Failed to save voucher: duplicate key");
    }

    #[tokio::test]
    async fn structural_errors_short_circuit() {
        let users = directory();
        let handler = handler(
            users.clone(),
            catalog(),
            Arc::new(MockNotifier::new()),
            Arc::new(MockVoucherRepository::new()),
        );

        let mut cmd = command(&[["10", "a@x.org", "#t1", "Jan", "1"]]);
        cmd.headers.retain(|h| h != "task");

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, VoucherImportError::MissingColumn("task".to_string()));
        assert!(users.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_sheet_is_rejected() {
        let handler = handler(
            directory(),
            catalog(),
            Arc::new(MockNotifier::new()),
            Arc::new(MockVoucherRepository::new()),
        );

        let err = handler.handle(command(&[])).await.unwrap_err();

        assert_eq!(err, VoucherImportError::EmptyFile);
    }

    #[tokio::test]
    async fn reimport_restarts_codes() {
        let repository = Arc::new(MockVoucherRepository::new());
        let handler = handler(
            directory(),
            catalog(),
            Arc::new(MockNotifier::new()),
            repository.clone(),
        );
        let lines = [["10", "a@x.org", "#t1", "Jan", "1"]];

        let first = handler.handle(command(&lines)).await.unwrap();
        let second = handler.handle(command(&lines)).await.unwrap();

        assert_eq!(first.success[0].code, second.success[0].code);
        assert_ne!(first.success[0].id, second.success[0].id);
        assert_eq!(repository.saved().len(), 2);
    }
}
