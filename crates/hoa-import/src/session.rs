//! Import session: the aggregate tying headers, rows, mapping, and
//! validation state together for one uploaded file.
//!
//! Stage transitions are one-directional. Editing the mapping after
//! validation does not patch downstream state: it drops every result
//! computed after the mapping stage and the session re-validates from
//! scratch. Sessions live for the duration of one wizard flow and are
//! never persisted.

use tracing::debug;

use hoa_map::MappingEngine;
use hoa_model::{
    ColumnMapping, EntityType, ImportError, ImportResult, RawRow, ValidationResult,
};
use hoa_validate::{validate_mapping, validate_rows};

/// Pipeline stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// File accepted, mapping not yet proposed.
    Idle,
    /// A mapping exists (proposed or operator-edited) but has not passed
    /// the structural check.
    MappingPending,
    /// All required fields are mapped.
    StructurallyValid,
    /// Row-level validation has run; see the stored result for counts.
    RowValidated,
    /// An executor run is in flight.
    Importing,
    Completed,
    Failed,
}

/// One in-progress import of one uploaded file.
pub struct ImportSession {
    file_name: String,
    entity: EntityType,
    headers: Vec<String>,
    rows: Vec<RawRow>,
    mappings: Vec<ColumnMapping>,
    structural: Option<ValidationResult>,
    row_validation: Option<ValidationResult>,
    import_result: Option<ImportResult>,
    state: SessionState,
}

impl ImportSession {
    /// Accept an uploaded file: headers plus ordered rows keyed by
    /// header. The upload boundary has already decoded the file format.
    pub fn new(
        file_name: impl Into<String>,
        entity: EntityType,
        headers: Vec<String>,
        rows: Vec<RawRow>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            entity,
            headers,
            rows,
            mappings: Vec::new(),
            structural: None,
            row_validation: None,
            import_result: None,
            state: SessionState::Idle,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn structural_validation(&self) -> Option<&ValidationResult> {
        self.structural.as_ref()
    }

    pub fn row_validation(&self) -> Option<&ValidationResult> {
        self.row_validation.as_ref()
    }

    pub fn import_result(&self) -> Option<&ImportResult> {
        self.import_result.as_ref()
    }

    /// Run the auto-mapping generator over the file's headers.
    pub fn propose_mapping(&mut self) -> &[ColumnMapping] {
        let engine = MappingEngine::new(self.entity);
        self.apply_mapping(engine.generate(&self.headers));
        &self.mappings
    }

    /// Install an operator-edited mapping. Any validation or import
    /// readiness computed for the previous mapping is discarded.
    pub fn set_mapping(&mut self, mappings: Vec<ColumnMapping>) {
        self.apply_mapping(mappings);
    }

    fn apply_mapping(&mut self, mappings: Vec<ColumnMapping>) {
        debug!(
            entity = %self.entity,
            columns = mappings.len(),
            "mapping updated; downstream results invalidated"
        );
        self.mappings = mappings;
        self.structural = None;
        self.row_validation = None;
        self.import_result = None;
        self.state = SessionState::MappingPending;
    }

    /// Structural check: every required field covered by the mapping.
    pub fn validate_structure(&mut self) -> &ValidationResult {
        let result = validate_mapping(self.entity, &self.mappings);
        self.state = if result.is_valid {
            SessionState::StructurallyValid
        } else {
            SessionState::MappingPending
        };
        self.row_validation = None;
        self.import_result = None;
        &*self.structural.insert(result)
    }

    /// Row-level check. Requires a structurally valid mapping.
    pub fn validate_data(&mut self) -> Result<&ValidationResult, ImportError> {
        if self.state < SessionState::StructurallyValid {
            return Err(ImportError::MappingNotValidated);
        }
        let result = validate_rows(self.entity, &self.mappings, &self.rows);
        self.state = SessionState::RowValidated;
        self.import_result = None;
        Ok(&*self.row_validation.insert(result))
    }

    /// Claim the session for an executor run. Rejects a second run while
    /// one is in flight, a rerun of a finished session, and any run
    /// before row validation.
    pub(crate) fn begin_import(&mut self) -> Result<(), ImportError> {
        match self.state {
            SessionState::Importing => Err(ImportError::ImportInProgress),
            SessionState::Completed | SessionState::Failed => Err(ImportError::SessionFinished),
            SessionState::RowValidated => {
                self.state = SessionState::Importing;
                Ok(())
            }
            _ => Err(ImportError::MappingNotValidated),
        }
    }

    /// Record the terminal outcome of an executor run.
    pub(crate) fn finish_import(&mut self, result: ImportResult) {
        self.state = if result.success {
            SessionState::Completed
        } else {
            SessionState::Failed
        };
        self.import_result = Some(result);
    }
}
