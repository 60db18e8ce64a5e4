//! Row-level validation.
//!
//! Once a mapping is confirmed and the file's rows are available, each
//! row is projected through the mapping and classified:
//!
//! - **Error** — a required field is blank or malformed; the row cannot
//!   be imported.
//! - **Warning** — an optional field is present but malformed; the row
//!   imports, flagged.
//! - **Valid** — everything present and well-formed.
//!
//! Warnings never block a batch; errors block only their own rows at
//! this stage (the import executor refuses the whole batch while any
//! error remains).

use hoa_model::{
    ColumnMapping, EntityType, FieldCatalog, RawRow, RowCounts, RowStatus, ValidationResult,
    project_row,
};

use crate::rules::{check_value, kind_for};

/// Classification of one row with its findings.
#[derive(Debug, Clone)]
pub struct RowReport {
    pub status: RowStatus,
    /// Blocking problems (required field blank or malformed).
    pub errors: Vec<String>,
    /// Non-blocking problems (optional field malformed).
    pub warnings: Vec<String>,
}

/// Classify a single projected row against the entity's catalog.
pub fn classify_record(
    catalog: &FieldCatalog,
    record: &hoa_model::Record,
) -> RowReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for field in &catalog.fields {
        match record.get(&field.name) {
            None => {
                // Projection drops blank cells, so absence means blank.
                if field.required {
                    errors.push(format!("required field \"{}\" is empty", field.name));
                }
            }
            Some(value) => {
                if let Err(problem) = check_value(kind_for(&field.name), value) {
                    if field.required {
                        errors.push(format!("required field \"{}\": {problem}", field.name));
                    } else {
                        warnings.push(format!("field \"{}\": {problem}", field.name));
                    }
                }
            }
        }
    }

    let status = if !errors.is_empty() {
        RowStatus::Error
    } else if !warnings.is_empty() {
        RowStatus::Warning
    } else {
        RowStatus::Valid
    };
    RowReport {
        status,
        errors,
        warnings,
    }
}

/// Validate a full batch of raw rows under a confirmed mapping.
///
/// Blocking messages are prefixed with their 1-based row number; warnings
/// affect counts only. Inputs are never mutated; the result is built
/// fresh on every call.
pub fn validate_rows(
    entity: EntityType,
    mappings: &[ColumnMapping],
    rows: &[RawRow],
) -> ValidationResult {
    let catalog = FieldCatalog::for_entity(entity);
    let mut counts = RowCounts::default();
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let record = project_row(mappings, row);
        let report = classify_record(&catalog, &record);
        counts.tally(report.status);
        for problem in report.errors {
            errors.push(format!("Row {}: {problem}.", index + 1));
        }
    }

    ValidationResult::row_level(errors, counts)
}

/// Per-row statuses in row order, for callers that need to know which
/// rows carried warnings (e.g. the import executor's tally).
pub fn row_statuses(
    entity: EntityType,
    mappings: &[ColumnMapping],
    rows: &[RawRow],
) -> Vec<RowStatus> {
    let catalog = FieldCatalog::for_entity(entity);
    rows.iter()
        .map(|row| classify_record(&catalog, &project_row(mappings, row)).status)
        .collect()
}
