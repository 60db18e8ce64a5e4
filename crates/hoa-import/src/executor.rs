//! Import executor.
//!
//! Projects validated rows through the confirmed mapping and commits
//! them through the persistence contract in chunks, reporting progress
//! after each chunk. Commit is best-effort: chunks committed before a
//! fatal persistence error or a cancellation stay committed; the result
//! reports exactly how many rows landed.

use tracing::{debug, error, info, warn};

use hoa_model::{ImportError, ImportResult, Record, RowStatus, project_row};
use hoa_validate::row_statuses;

use crate::progress::{CancelToken, ProgressObserver};
use crate::repository::RecordRepository;
use crate::session::ImportSession;

/// Rows submitted per `commit_batch` call.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Executes one import run against an injected repository.
pub struct ImportExecutor<'a> {
    repository: &'a dyn RecordRepository,
    chunk_size: usize,
}

impl<'a> ImportExecutor<'a> {
    pub fn new(repository: &'a dyn RecordRepository) -> Self {
        Self {
            repository,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the commit chunk size (clamped to at least 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Run the import for a row-validated session.
    ///
    /// Precondition violations (no row validation, row errors present,
    /// nothing to import) are reported as an immediate non-success
    /// [`ImportResult`] without touching the repository. A second
    /// invocation while a run is in flight is rejected with
    /// [`ImportError::ImportInProgress`].
    pub fn execute(
        &self,
        session: &mut ImportSession,
        cancel: &CancelToken,
        observer: &dyn ProgressObserver,
    ) -> Result<ImportResult, ImportError> {
        if let Some(result) = self.check_preconditions(session) {
            warn!(
                file = session.file_name(),
                message = result.error_message.as_deref().unwrap_or(""),
                "import rejected before start"
            );
            // The session keeps its current stage so the operator can fix
            // the input and retry.
            observer.on_finished(&result);
            return Ok(result);
        }
        session.begin_import()?;

        let entity = session.entity();
        let statuses = row_statuses(entity, session.mappings(), session.rows());
        let batch: Vec<(Record, RowStatus)> = session
            .rows()
            .iter()
            .zip(statuses)
            .map(|(row, status)| (project_row(session.mappings(), row), status))
            .collect();
        let total = batch.len();
        info!(
            file = session.file_name(),
            entity = %entity,
            rows = total,
            chunk_size = self.chunk_size,
            "import started"
        );

        observer.on_progress(0);
        let mut imported = 0usize;
        let mut warned = 0usize;
        let mut last_percent = 0u8;

        for chunk in batch.chunks(self.chunk_size) {
            if cancel.is_cancelled() {
                let result = ImportResult::failed(
                    ImportError::Cancelled.to_string(),
                    imported,
                    warned,
                );
                info!(imported, "import cancelled");
                return Ok(self.finish(session, observer, result));
            }

            let records: Vec<Record> = chunk.iter().map(|(record, _)| record.clone()).collect();
            match self.repository.commit_batch(entity, &records) {
                Ok(accepted) => {
                    imported += accepted;
                    warned += chunk
                        .iter()
                        .filter(|(_, status)| *status == RowStatus::Warning)
                        .count();
                    debug!(imported, total, "chunk committed");
                }
                Err(cause) => {
                    error!(imported, %cause, "persistence rejected batch");
                    let result = ImportResult::failed(
                        ImportError::Persistence(cause.to_string()).to_string(),
                        imported,
                        warned,
                    );
                    return Ok(self.finish(session, observer, result));
                }
            }

            // Hold 100 back for the terminal notification.
            let percent = ((imported * 100 / total) as u8).min(99).max(last_percent);
            last_percent = percent;
            observer.on_progress(percent);
        }

        info!(imported, warned, "import completed");
        let result = ImportResult::succeeded(imported, warned);
        Ok(self.finish(session, observer, result))
    }

    fn finish(
        &self,
        session: &mut ImportSession,
        observer: &dyn ProgressObserver,
        result: ImportResult,
    ) -> ImportResult {
        observer.on_progress(100);
        session.finish_import(result.clone());
        observer.on_finished(&result);
        result
    }

    fn check_preconditions(&self, session: &ImportSession) -> Option<ImportResult> {
        let Some(validation) = session.row_validation() else {
            return Some(ImportResult::rejected(
                ImportError::MappingNotValidated.to_string(),
            ));
        };
        if validation.row_counts.errors > 0 {
            return Some(ImportResult::rejected(
                ImportError::ValidationErrorsPresent(validation.row_counts.errors).to_string(),
            ));
        }
        if validation.row_counts.importable() == 0 {
            return Some(ImportResult::rejected(
                ImportError::NothingToImport.to_string(),
            ));
        }
        None
    }
}
