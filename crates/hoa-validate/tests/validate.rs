//! End-to-end validation of auto-generated mappings against row data.

use hoa_map::generate_mapping;
use hoa_model::{EntityType, RawRow};
use hoa_validate::{validate_mapping, validate_rows};

fn rows_from(headers: &[&str], data: &[&[&str]]) -> Vec<RawRow> {
    data.iter()
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

#[test]
fn association_file_passes_both_stages() {
    let headers = vec![
        "Association Name".to_string(),
        "City".to_string(),
        "State Abbrev".to_string(),
    ];
    let mappings = generate_mapping(&headers, EntityType::Association);

    let structural = validate_mapping(EntityType::Association, &mappings);
    assert!(structural.is_valid, "errors: {:?}", structural.errors);

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows = rows_from(
        &header_refs,
        &[
            &["Oakwood HOA", "Denver", "CO"],
            &["Maple Commons", "Austin", "TX"],
        ],
    );
    let row_result = validate_rows(EntityType::Association, &mappings, &rows);
    assert!(row_result.is_valid);
    assert_eq!(row_result.row_counts.valid, 2);
}

#[test]
fn missing_state_column_blocks_before_rows_are_read() {
    let headers = vec!["Association Name".to_string(), "City".to_string()];
    let mappings = generate_mapping(&headers, EntityType::Association);

    let structural = validate_mapping(EntityType::Association, &mappings);
    assert!(!structural.is_valid);
    assert_eq!(
        structural.errors,
        vec!["Required field \"state\" is not mapped.".to_string()]
    );
}

#[test]
fn resident_batch_mixes_all_three_classes() {
    let headers = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
        "Phone".to_string(),
    ];
    let mappings = generate_mapping(&headers, EntityType::Resident);
    assert!(validate_mapping(EntityType::Resident, &mappings).is_valid);

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows = rows_from(
        &header_refs,
        &[
            &["John", "Doe", "john@example.com", "555-010-4477"],
            &["Jane", "Doe", "jane@example.com", "nope"],
            &["Bad", "Actor", "bad-email", ""],
        ],
    );
    let result = validate_rows(EntityType::Resident, &mappings, &rows);
    assert!(!result.is_valid);
    assert_eq!(result.row_counts.total, 3);
    assert_eq!(result.row_counts.valid, 1);
    assert_eq!(result.row_counts.warnings, 1);
    assert_eq!(result.row_counts.errors, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Row 3:"));
}

#[test]
fn revalidation_replaces_the_result_wholesale() {
    let headers = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
    ];
    let mappings = generate_mapping(&headers, EntityType::Resident);
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let bad = rows_from(&header_refs, &[&["A", "B", "broken"]]);
    let first = validate_rows(EntityType::Resident, &mappings, &bad);
    assert!(!first.is_valid);

    let good = rows_from(&header_refs, &[&["A", "B", "a@b.co"]]);
    let second = validate_rows(EntityType::Resident, &mappings, &good);
    assert!(second.is_valid);
    assert!(second.errors.is_empty());
    assert_eq!(second.row_counts.errors, 0);
}
