use thiserror::Error;

/// Validation errors for fingerprint primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// An empty noise prefix would classify every frame as noise.
    #[error("noise prefix at position {index} is empty")]
    EmptyPrefix {
        /// Position of the empty prefix in the configured list.
        index: usize,
    },
}
