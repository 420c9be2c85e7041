//! Deterministic fingerprints for grouping duplicate crash reports.
//!
//! A fingerprint is built in two stages. The [`Canonicalizer`] walks an
//! [`Occurrence`] and its cause chain, keeps the frames that belong to
//! application code and renders them as text such as
//! `java.lang.NullPointerException/com.example.Foo#bar@42`. The
//! [`Digester`] then optionally reduces that text to a fixed-length
//! lowercase hex digest. [`CrashId`] combines both.
//!
#![deny(missing_docs)]

/// Canonical text construction.
pub mod canonicalizer;
/// Settings for building a fingerprinter.
pub mod config;
/// Digest reduction and fingerprint values.
pub mod digest;
/// Top-level error type.
pub mod error;
/// Entry point combining canonicalization and digest reduction.
pub mod fingerprinter;
/// Occurrence interface and owned records.
pub mod occurrence;
/// Runtime-frame relevance filter.
pub mod noise;
/// Statistics emitted during canonicalization.
pub mod report;
/// Parser for printed JVM stack traces.
pub mod trace;
/// Validation helpers used by fingerprint types.
pub mod validation;

pub use canonicalizer::{
    CanonicalizationError, CanonicalizationResult, Canonicalizer, RawFingerprint, CAUSE_MARKER,
    FRAME_SEPARATOR, LINE_MARKER, METHOD_MARKER,
};
pub use config::CrashIdConfig;
pub use digest::{DigestAlg, DigestError, Digester, Fingerprint};
pub use error::CrashIdError;
pub use fingerprinter::{CrashId, Inspection};
pub use noise::{NoisePrefixes, JVM_NOISE_PREFIXES};
pub use occurrence::{Crash, Occurrence, StackFrame};
pub use report::CanonicalizationReport;
pub use trace::{parse_stack_trace, TraceError};
pub use validation::ValidationError;
