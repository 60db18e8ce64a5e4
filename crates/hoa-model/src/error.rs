use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),
    #[error("mapping has not passed structural validation")]
    MappingNotValidated,
    #[error("row validation reported {0} error(s); import is blocked")]
    ValidationErrorsPresent(usize),
    #[error("no importable rows in this session")]
    NothingToImport,
    #[error("an import is already in progress for this session")]
    ImportInProgress,
    #[error("this import session has already finished")]
    SessionFinished,
    #[error("import cancelled by operator")]
    Cancelled,
    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
