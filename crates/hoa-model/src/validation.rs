use serde::{Deserialize, Serialize};

/// Classification of a single row after row-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// All mapped values present and well-formed.
    Valid,
    /// Importable, but an optional value is malformed or a soft rule fired.
    Warning,
    /// Not importable: a required value is blank or malformed.
    Error,
}

/// Aggregate row counts for a validated batch.
///
/// Invariant: `total == valid + warnings + errors`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    pub total: usize,
    pub valid: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl RowCounts {
    pub fn tally(&mut self, status: RowStatus) {
        self.total += 1;
        match status {
            RowStatus::Valid => self.valid += 1,
            RowStatus::Warning => self.warnings += 1,
            RowStatus::Error => self.errors += 1,
        }
    }

    /// Rows that may be committed (valid + warning).
    pub fn importable(&self) -> usize {
        self.valid + self.warnings
    }
}

/// Outcome of a validation pass. Always replaced as a whole; never
/// partially mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub row_counts: RowCounts,
}

impl ValidationResult {
    /// Result of a structural (mapping-only) check. No rows examined yet.
    pub fn structural(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            row_counts: RowCounts::default(),
        }
    }

    /// Result of a row-level check. Blocking iff any row errored;
    /// warnings alone do not block import.
    pub fn row_level(errors: Vec<String>, row_counts: RowCounts) -> Self {
        Self {
            is_valid: row_counts.errors == 0,
            errors,
            row_counts,
        }
    }
}
