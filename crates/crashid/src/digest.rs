use regex::Regex;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::canonicalizer::RawFingerprint;
use crate::validation::ValidationError;

/// Known-answer input used to check a digest implementation at construction.
const SELF_TEST_INPUT: &[u8] = b"abc";

/// Supported digest algorithms for condensed fingerprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-1 (160 bits), the default.
    #[default]
    #[serde(rename = "sha-1")]
    Sha1,
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl DigestAlg {
    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlg::Sha1 => 20,
            DigestAlg::Sha256 => 32,
        }
    }

    /// Length of the hex rendering.
    pub fn hex_len(self) -> usize {
        self.output_len() * 2
    }

    /// Stable name, as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlg::Sha1 => "sha-1",
            DigestAlg::Sha256 => "sha-256",
        }
    }

    fn known_answer(self) -> &'static str {
        match self {
            DigestAlg::Sha1 => "a9993e364706816aba3e25717850c26c9cd0d89d",
            DigestAlg::Sha256 => "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        }
    }

    fn hash(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            DigestAlg::Sha1 => Sha1::digest(bytes).to_vec(),
            DigestAlg::Sha256 => Sha256::digest(bytes).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlg {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha-1" | "sha1" => Ok(DigestAlg::Sha1),
            "sha-256" | "sha256" => Ok(DigestAlg::Sha256),
            _ => Err(DigestError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Errors raised while setting up a digest reducer.
///
/// Both indicate a broken deployment rather than a bad input.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DigestError {
    /// The requested algorithm is not available.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The algorithm produced a wrong known-answer digest.
    #[error("{alg} failed its known-answer self-test")]
    SelfTest {
        /// Algorithm under test.
        alg: DigestAlg,
    },
}

/// Final fingerprint handed to callers: raw canonical text or a hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps raw canonical text.
    pub fn raw(raw: RawFingerprint) -> Self {
        Self(raw.into_string())
    }

    /// Validates a digest-mode fingerprint produced with `alg`.
    pub fn parse_digest(alg: DigestAlg, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let pattern = format!("^[0-9a-f]{{{}}}$", alg.hex_len());
        let re = Regex::new(&pattern).expect("invalid regex");
        if !re.is_match(&value) {
            return Err(ValidationError::PatternMismatch {
                field: "fingerprint",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Borrows the fingerprint string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the fingerprint string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces canonical text to a fixed-length lowercase hex digest.
#[derive(Debug, Clone, Copy)]
pub struct Digester {
    alg: DigestAlg,
}

impl Digester {
    /// Creates a reducer after checking `alg` against its known answer.
    pub fn new(alg: DigestAlg) -> Result<Self, DigestError> {
        if hex::encode(alg.hash(SELF_TEST_INPUT)) != alg.known_answer() {
            return Err(DigestError::SelfTest { alg });
        }
        Ok(Self { alg })
    }

    /// Algorithm used by this reducer.
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Hashes the UTF-8 bytes of `raw`.
    pub fn reduce(&self, raw: &RawFingerprint) -> Fingerprint {
        Fingerprint(hex::encode(self.alg.hash(raw.as_str().as_bytes())))
    }
}
