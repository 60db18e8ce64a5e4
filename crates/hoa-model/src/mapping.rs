use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::IGNORE_FIELD;

/// A raw uploaded row: header text to cell value, as supplied by the
/// upload boundary. The pipeline never parses files itself.
pub type RawRow = BTreeMap<String, String>;

/// A projected row keyed by canonical field name, ready for the
/// persistence contract.
pub type Record = BTreeMap<String, String>;

/// One column of the uploaded file mapped onto a canonical target field
/// (or the `"ignore"` sentinel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Literal header text from the uploaded file.
    pub source_field: String,
    /// Canonical field name, or [`IGNORE_FIELD`].
    pub target_field: String,
}

impl ColumnMapping {
    pub fn new(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
        }
    }

    /// Shorthand for a column the import drops.
    pub fn ignored(source_field: impl Into<String>) -> Self {
        Self::new(source_field, IGNORE_FIELD)
    }

    /// True if this column is dropped on import.
    pub fn is_ignored(&self) -> bool {
        self.target_field == IGNORE_FIELD
    }
}

/// Project a raw row through a mapping into a canonical record.
///
/// Ignored columns are dropped and blank cells omitted. When two source
/// columns map onto the same target, the later entry in the mapping wins.
pub fn project_row(mappings: &[ColumnMapping], row: &RawRow) -> Record {
    let mut record = Record::new();
    for mapping in mappings {
        if mapping.is_ignored() {
            continue;
        }
        if let Some(value) = row.get(&mapping.source_field) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            record.insert(mapping.target_field.clone(), trimmed.to_string());
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn projects_and_drops_ignored_columns() {
        let mappings = vec![
            ColumnMapping::new("First", "first_name"),
            ColumnMapping::ignored("Internal Code"),
        ];
        let record = project_row(&mappings, &row(&[("First", "Ada"), ("Internal Code", "X9")]));
        assert_eq!(record.get("first_name").map(String::as_str), Some("Ada"));
        assert!(!record.contains_key("Internal Code"));
    }

    #[test]
    fn blank_cells_are_omitted() {
        let mappings = vec![ColumnMapping::new("Email", "email")];
        let record = project_row(&mappings, &row(&[("Email", "   ")]));
        assert!(record.is_empty());
    }

    #[test]
    fn duplicate_targets_last_wins() {
        let mappings = vec![
            ColumnMapping::new("Phone 1", "phone"),
            ColumnMapping::new("Phone 2", "phone"),
        ];
        let record = project_row(
            &mappings,
            &row(&[("Phone 1", "555-0100"), ("Phone 2", "555-0199")]),
        );
        assert_eq!(record.get("phone").map(String::as_str), Some("555-0199"));
    }
}
