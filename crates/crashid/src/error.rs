use thiserror::Error;

/// Top-level error for fingerprinting operations.
#[derive(Error, Debug)]
pub enum CrashIdError {
    /// The digest reducer could not be set up.
    #[error("digest setup failed: {0}")]
    Digest(#[from] crate::digest::DigestError),
    /// The occurrence chain could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::canonicalizer::CanonicalizationError),
    /// A printed stack trace could not be parsed.
    #[error("stack trace parsing failed: {0}")]
    Trace(#[from] crate::trace::TraceError),
    /// A configured value is invalid.
    #[error("invalid configuration: {0}")]
    Validation(#[from] crate::validation::ValidationError),
    /// Configuration JSON is malformed.
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}
