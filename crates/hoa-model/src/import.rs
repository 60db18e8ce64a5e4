use serde::{Deserialize, Serialize};

/// Terminal outcome of an import run. Produced exactly once by the
/// executor and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    /// Rows committed through the persistence contract.
    pub records_imported: usize,
    /// Committed rows that were flagged as warnings during validation.
    pub records_with_warnings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ImportResult {
    pub fn succeeded(records_imported: usize, records_with_warnings: usize) -> Self {
        Self {
            success: true,
            records_imported,
            records_with_warnings,
            error_message: None,
        }
    }

    /// A run that failed before or during commit. `records_imported`
    /// reflects rows already committed; they are not rolled back.
    pub fn failed(
        message: impl Into<String>,
        records_imported: usize,
        records_with_warnings: usize,
    ) -> Self {
        Self {
            success: false,
            records_imported,
            records_with_warnings,
            error_message: Some(message.into()),
        }
    }

    /// A run rejected before any work was attempted.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failed(message, 0, 0)
    }
}
