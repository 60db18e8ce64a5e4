use std::path::PathBuf;

use hoa_model::{EntityType, ImportResult, ValidationResult};

/// One line of the mapping preview: where a column will land and why.
#[derive(Debug)]
pub struct MappingRow {
    pub source: String,
    pub target: String,
    /// "pattern:<concept>", "label-score", "operator", or "unmatched".
    pub origin: String,
}

#[derive(Debug)]
pub struct MapReport {
    pub file: PathBuf,
    pub entity: EntityType,
    pub row_count: usize,
    pub mappings: Vec<MappingRow>,
    pub structural: ValidationResult,
}

#[derive(Debug)]
pub struct ImportReport {
    pub file: PathBuf,
    pub entity: EntityType,
    pub structural: ValidationResult,
    /// Present once the mapping passed the structural check.
    pub row_validation: Option<ValidationResult>,
    /// Present unless the run stopped at validation (structural failure
    /// or --dry-run).
    pub result: Option<ImportResult>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl ImportReport {
    /// True when the run should exit non-zero.
    pub fn has_errors(&self) -> bool {
        if !self.structural.is_valid {
            return true;
        }
        if let Some(validation) = &self.row_validation
            && validation.row_counts.errors > 0
        {
            return true;
        }
        match &self.result {
            Some(result) => !result.success,
            None => false,
        }
    }
}
