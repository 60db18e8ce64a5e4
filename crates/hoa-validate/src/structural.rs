//! Structural mapping validation.
//!
//! Runs before any row data is read: every required field of the entity's
//! catalog must be covered by some column mapping. Extra `"ignore"`
//! entries are fine.

use hoa_model::{ColumnMapping, EntityType, FieldCatalog, ValidationResult};

/// Check that all required fields are mapped. One error per unsatisfied
/// required field, naming that field.
pub fn validate_mapping(entity: EntityType, mappings: &[ColumnMapping]) -> ValidationResult {
    let catalog = FieldCatalog::for_entity(entity);
    let mut errors = Vec::new();
    for field in catalog.required_fields() {
        let covered = mappings
            .iter()
            .any(|mapping| !mapping.is_ignored() && mapping.target_field == field.name);
        if !covered {
            errors.push(format!("Required field \"{}\" is not mapped.", field.name));
        }
    }
    ValidationResult::structural(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_coverage_is_valid() {
        let mappings = vec![
            ColumnMapping::new("First", "first_name"),
            ColumnMapping::new("Last", "last_name"),
            ColumnMapping::new("Email", "email"),
            ColumnMapping::ignored("Notes"),
        ];
        let result = validate_mapping(EntityType::Resident, &mappings);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn one_error_per_missing_required_field() {
        let mappings = vec![ColumnMapping::new("First", "first_name")];
        let result = validate_mapping(EntityType::Resident, &mappings);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Required field \"last_name\" is not mapped.".to_string(),
                "Required field \"email\" is not mapped.".to_string(),
            ]
        );
    }

    #[test]
    fn ignored_entries_do_not_satisfy_requirements() {
        // A column explicitly ignored never counts as coverage, even if
        // an editor bug were to leave a stray entry.
        let mappings = vec![
            ColumnMapping::new("Assoc", "association_name"),
            ColumnMapping::new("City", "city"),
            ColumnMapping::ignored("State"),
        ];
        let result = validate_mapping(EntityType::Association, &mappings);
        assert_eq!(
            result.errors,
            vec!["Required field \"state\" is not mapped.".to_string()]
        );
    }

    #[test]
    fn structural_result_has_zero_row_counts() {
        let result = validate_mapping(EntityType::Vendor, &[]);
        assert_eq!(result.row_counts.total, 0);
    }
}
