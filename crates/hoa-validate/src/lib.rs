//! Mapping and row validation for the bulk import pipeline.
//!
//! Two entry points, invoked at different pipeline stages:
//! [`validate_mapping`] checks that every required field is covered
//! before any row is read; [`validate_rows`] classifies each row as
//! valid, warning, or error once the data is available. Both return a
//! fresh [`hoa_model::ValidationResult`] and never mutate their input.

pub mod rows;
pub mod rules;
pub mod structural;

pub use rows::{RowReport, classify_record, row_statuses, validate_rows};
pub use rules::{FieldKind, check_value, kind_for, parse_date};
pub use structural::validate_mapping;
