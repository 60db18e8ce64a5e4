//! End-to-end executor behavior: preconditions, progress, partial
//! failure, and cancellation.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hoa_import::{
    CancelToken, ImportExecutor, ImportSession, InMemoryRepository, ProgressObserver,
    RecordRepository, SessionState,
};
use hoa_model::{EntityType, ImportError, ImportResult, RawRow, Record};

fn resident_rows(emails: &[&str]) -> (Vec<String>, Vec<RawRow>) {
    let headers = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
    ];
    let rows = emails
        .iter()
        .enumerate()
        .map(|(i, email)| {
            [
                ("First Name", format!("Resident{i}")),
                ("Last Name", "Example".to_string()),
                ("Email", email.to_string()),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
        .collect();
    (headers, rows)
}

fn validated_session(emails: &[&str]) -> ImportSession {
    let (headers, rows) = resident_rows(emails);
    let mut session = ImportSession::new("residents.csv", EntityType::Resident, headers, rows);
    session.propose_mapping();
    assert!(session.validate_structure().is_valid);
    session.validate_data().expect("row validation runs");
    session
}

/// Observer that records every notification for assertions.
#[derive(Default)]
struct RecordingObserver {
    percents: Mutex<Vec<u8>>,
    finished: Mutex<Vec<ImportResult>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, percent: u8) {
        self.percents.lock().unwrap().push(percent);
    }

    fn on_finished(&self, result: &ImportResult) {
        self.finished.lock().unwrap().push(result.clone());
    }
}

/// Repository that fails on the nth commit call.
struct FlakyRepository {
    inner: InMemoryRepository,
    calls: AtomicUsize,
    fail_on_call: usize,
}

impl FlakyRepository {
    fn new(fail_on_call: usize) -> Self {
        Self {
            inner: InMemoryRepository::new(),
            calls: AtomicUsize::new(0),
            fail_on_call,
        }
    }
}

impl RecordRepository for FlakyRepository {
    fn commit_batch(&self, entity: EntityType, records: &[Record]) -> anyhow::Result<usize> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_call {
            anyhow::bail!("connection reset by peer");
        }
        self.inner.commit_batch(entity, records)
    }
}

#[test]
fn successful_import_commits_all_rows() {
    let mut session = validated_session(&["a@x.co", "b@x.co", "c@x.co"]);
    let repo = InMemoryRepository::new();
    let observer = RecordingObserver::default();

    let result = ImportExecutor::new(&repo)
        .with_chunk_size(2)
        .execute(&mut session, &CancelToken::new(), &observer)
        .unwrap();

    assert!(result.success);
    assert_eq!(result.records_imported, 3);
    assert_eq!(result.records_with_warnings, 0);
    assert_eq!(repo.committed_count(EntityType::Resident), 3);
    assert_eq!(session.state(), SessionState::Completed);

    // Committed records are canonical: keyed by target field.
    let committed = repo.committed(EntityType::Resident);
    assert!(committed[0].contains_key("first_name"));
    assert!(!committed[0].contains_key("First Name"));
}

#[test]
fn progress_is_monotone_and_terminates_at_100() {
    let mut session = validated_session(&["a@x.co", "b@x.co", "c@x.co", "d@x.co", "e@x.co"]);
    let repo = InMemoryRepository::new();
    let observer = RecordingObserver::default();

    ImportExecutor::new(&repo)
        .with_chunk_size(2)
        .execute(&mut session, &CancelToken::new(), &observer)
        .unwrap();

    let percents = observer.percents.lock().unwrap().clone();
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*percents.last().unwrap(), 100);
    assert_eq!(percents.iter().filter(|p| **p == 100).count(), 1);
    assert_eq!(observer.finished.lock().unwrap().len(), 1);
}

#[test]
fn rows_with_errors_block_the_whole_batch() {
    let mut session = validated_session(&["a@x.co", "not-an-email"]);
    let repo = InMemoryRepository::new();
    let observer = RecordingObserver::default();

    let result = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &observer)
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.records_imported, 0);
    assert!(result.error_message.unwrap().contains("import is blocked"));
    // The persistence contract is never invoked.
    assert_eq!(repo.committed_count(EntityType::Resident), 0);
    // The session is left where it was so the operator can fix the file.
    assert_eq!(session.state(), SessionState::RowValidated);
}

#[test]
fn import_without_row_validation_is_rejected() {
    let (headers, rows) = resident_rows(&["a@x.co"]);
    let mut session = ImportSession::new("r.csv", EntityType::Resident, headers, rows);
    session.propose_mapping();
    let repo = InMemoryRepository::new();

    let result = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &RecordingObserver::default())
        .unwrap();

    assert!(!result.success);
    assert_eq!(repo.committed_count(EntityType::Resident), 0);
}

#[test]
fn warning_rows_are_imported_and_counted() {
    // Phone is optional; a malformed phone yields a warning row that
    // still imports.
    let headers = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
        "Phone".to_string(),
    ];
    let rows: Vec<RawRow> = vec![
        [
            ("First Name", "A"),
            ("Last Name", "B"),
            ("Email", "a@b.co"),
            ("Phone", "555-010-4477"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
        [
            ("First Name", "C"),
            ("Last Name", "D"),
            ("Email", "c@d.co"),
            ("Phone", "shouting"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    ];
    let mut session = ImportSession::new("r.csv", EntityType::Resident, headers, rows);
    session.propose_mapping();
    assert!(session.validate_structure().is_valid);
    let validation = session.validate_data().unwrap();
    assert_eq!(validation.row_counts.warnings, 1);

    let repo = InMemoryRepository::new();
    let result = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &RecordingObserver::default())
        .unwrap();

    assert!(result.success);
    assert_eq!(result.records_imported, 2);
    assert_eq!(result.records_with_warnings, 1);
}

#[test]
fn persistence_failure_keeps_earlier_chunks() {
    let mut session = validated_session(&["a@x.co", "b@x.co", "c@x.co", "d@x.co"]);
    let repo = FlakyRepository::new(2);
    let observer = RecordingObserver::default();

    let result = ImportExecutor::new(&repo)
        .with_chunk_size(2)
        .execute(&mut session, &CancelToken::new(), &observer)
        .unwrap();

    assert!(!result.success);
    assert!(result.error_message.unwrap().contains("connection reset"));
    // Best-effort commit: the first chunk stays.
    assert_eq!(result.records_imported, 2);
    assert_eq!(repo.inner.committed_count(EntityType::Resident), 2);
    assert_eq!(session.state(), SessionState::Failed);

    let percents = observer.percents.lock().unwrap().clone();
    assert_eq!(*percents.last().unwrap(), 100);
}

/// Observer that cancels the shared token once the first chunk lands.
struct CancelAfterFirstChunk {
    token: CancelToken,
}

impl ProgressObserver for CancelAfterFirstChunk {
    fn on_progress(&self, percent: u8) {
        if percent > 0 && percent < 100 {
            self.token.cancel();
        }
    }
}

#[test]
fn cancellation_between_chunks_keeps_committed_chunks() {
    let mut session = validated_session(&["a@x.co", "b@x.co", "c@x.co", "d@x.co"]);
    let repo = InMemoryRepository::new();
    let cancel = CancelToken::new();
    let observer = CancelAfterFirstChunk {
        token: cancel.clone(),
    };

    let result = ImportExecutor::new(&repo)
        .with_chunk_size(2)
        .execute(&mut session, &cancel, &observer)
        .unwrap();

    assert!(!result.success);
    // The chunk committed before cancellation stays committed.
    assert_eq!(result.records_imported, 2);
    assert_eq!(repo.committed_count(EntityType::Resident), 2);
    assert_eq!(session.state(), SessionState::Failed);
}

#[test]
fn rejected_runs_notify_finish_without_progress() {
    let mut session = validated_session(&["a@x.co", "not-an-email"]);
    let repo = InMemoryRepository::new();
    let observer = RecordingObserver::default();

    let result = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &observer)
        .unwrap();

    assert!(!result.success);
    assert!(observer.percents.lock().unwrap().is_empty());
    assert_eq!(observer.finished.lock().unwrap().len(), 1);
}

#[test]
fn cancellation_before_first_commit_leaves_store_untouched() {
    let mut session = validated_session(&["a@x.co", "b@x.co"]);
    let repo = InMemoryRepository::new();
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = ImportExecutor::new(&repo)
        .execute(&mut session, &cancel, &RecordingObserver::default())
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.records_imported, 0);
    assert_eq!(repo.committed_count(EntityType::Resident), 0);
    assert_eq!(session.state(), SessionState::Failed);
}

#[test]
fn completed_session_cannot_be_rerun() {
    let mut session = validated_session(&["a@x.co"]);
    let repo = InMemoryRepository::new();

    let first = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &RecordingObserver::default())
        .unwrap();
    assert!(first.success);

    let second = ImportExecutor::new(&repo)
        .execute(&mut session, &CancelToken::new(), &RecordingObserver::default());
    assert!(matches!(second, Err(ImportError::SessionFinished)));
    // No double-commit happened.
    assert_eq!(repo.committed_count(EntityType::Resident), 1);
}
