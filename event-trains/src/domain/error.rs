//! Domain error types.
//!
//! These errors describe feed records that could not be turned into
//! domain values. They are distinct from API/IO errors.

use super::TimeError;

/// A feed record carried a field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{record}: bad {field} {value:?}: {source}")]
pub struct ConversionError {
    /// Which record was being converted (e.g., "train 16305")
    pub record: String,
    /// Feed field name
    pub field: &'static str,
    /// Raw field value
    pub value: String,
    /// Underlying parse failure
    #[source]
    pub source: TimeError,
}

impl ConversionError {
    /// Creates a conversion error for a time field.
    pub fn time(
        record: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
        source: TimeError,
    ) -> Self {
        Self {
            record: record.into(),
            field,
            value: value.into(),
            source,
        }
    }
}
