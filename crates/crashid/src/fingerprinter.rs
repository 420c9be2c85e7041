//! Entry point combining canonicalization and digest reduction.

use serde::Serialize;

use crate::canonicalizer::{Canonicalizer, RawFingerprint};
use crate::digest::{DigestAlg, Digester, Fingerprint};
use crate::error::CrashIdError;
use crate::noise::NoisePrefixes;
use crate::occurrence::Occurrence;
use crate::report::CanonicalizationReport;

/// Computes crash fingerprints.
///
/// The digest implementation is checked once, in [`CrashId::new`]; after
/// that the only failure left is a cyclic cause chain.
///
/// ```rust
/// use crashid::{Crash, CrashId};
///
/// let crash_id = CrashId::jvm()?;
/// let crash = Crash::new("java.lang.NullPointerException")
///     .with_frame("java.util.ArrayList", "get", 10)
///     .with_frame("com.example.Foo", "bar", 42);
///
/// let raw = crash_id.fingerprint_of(&crash, true)?;
/// assert_eq!(raw.as_str(), "java.lang.NullPointerException/com.example.Foo#bar@42");
///
/// let hashed = crash_id.fingerprint_of(&crash, false)?;
/// assert_eq!(hashed.as_str(), "06c7c1871db972fa704bcfd671f655ef8764fabd");
/// # Ok::<(), crashid::CrashIdError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CrashId {
    canonicalizer: Canonicalizer,
    digester: Digester,
}

/// Every view of one fingerprint computation.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    /// Canonical text.
    pub raw: RawFingerprint,
    /// Digest of the canonical text.
    pub fingerprint: Fingerprint,
    /// Algorithm that produced `fingerprint`.
    pub algorithm: DigestAlg,
    /// Walk statistics.
    pub report: CanonicalizationReport,
}

impl CrashId {
    /// Builds a fingerprinter, failing fast if `alg` is unusable.
    pub fn new(noise: NoisePrefixes, alg: DigestAlg) -> Result<Self, CrashIdError> {
        Ok(Self {
            canonicalizer: Canonicalizer::new(noise),
            digester: Digester::new(alg)?,
        })
    }

    /// JVM/Android noise prefixes with SHA-1.
    pub fn jvm() -> Result<Self, CrashIdError> {
        Self::new(NoisePrefixes::jvm(), DigestAlg::Sha1)
    }

    /// Canonicalizer used by this fingerprinter.
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Digest algorithm used outside raw mode.
    pub fn algorithm(&self) -> DigestAlg {
        self.digester.alg()
    }

    /// Returns the canonical text when `raw` is set, its digest otherwise.
    pub fn fingerprint_of(
        &self,
        occurrence: &dyn Occurrence,
        raw: bool,
    ) -> Result<Fingerprint, CrashIdError> {
        let result = self.canonicalizer.canonicalize(occurrence)?;
        if raw {
            Ok(Fingerprint::raw(result.raw))
        } else {
            Ok(self.digester.reduce(&result.raw))
        }
    }

    /// Computes the canonical text, its digest and the walk report at once.
    pub fn inspect(&self, occurrence: &dyn Occurrence) -> Result<Inspection, CrashIdError> {
        let result = self.canonicalizer.canonicalize(occurrence)?;
        let fingerprint = self.digester.reduce(&result.raw);
        Ok(Inspection {
            raw: result.raw,
            fingerprint,
            algorithm: self.digester.alg(),
            report: result.report,
        })
    }
}
