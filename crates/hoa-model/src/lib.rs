pub mod catalog;
pub mod entity;
pub mod error;
pub mod import;
pub mod mapping;
pub mod validation;

pub use catalog::{FieldCatalog, FieldCategory, FieldOption, IGNORE_FIELD};
pub use entity::EntityType;
pub use error::{ImportError, Result};
pub use import::ImportResult;
pub use mapping::{ColumnMapping, RawRow, Record, project_row};
pub use validation::{RowCounts, RowStatus, ValidationResult};
