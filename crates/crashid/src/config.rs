use serde::{Deserialize, Serialize};

use crate::digest::DigestAlg;
use crate::error::CrashIdError;
use crate::fingerprinter::CrashId;
use crate::noise::{NoisePrefixes, JVM_NOISE_PREFIXES};

/// Settings for building a [`CrashId`].
///
/// ```rust
/// use crashid::{CrashIdConfig, DigestAlg};
///
/// let config = CrashIdConfig::from_json(r#"{"algorithm": "sha-256"}"#)?;
/// assert_eq!(config.algorithm, DigestAlg::Sha256);
/// assert_eq!(config.noise_prefixes[0], "java.");
/// # Ok::<(), crashid::CrashIdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrashIdConfig {
    /// Scope prefixes whose frames are ignored, in match order.
    #[serde(default = "default_noise_prefixes")]
    pub noise_prefixes: Vec<String>,
    /// Digest used outside raw mode.
    #[serde(default)]
    pub algorithm: DigestAlg,
}

fn default_noise_prefixes() -> Vec<String> {
    JVM_NOISE_PREFIXES.iter().map(|p| p.to_string()).collect()
}

impl Default for CrashIdConfig {
    fn default() -> Self {
        Self {
            noise_prefixes: default_noise_prefixes(),
            algorithm: DigestAlg::default(),
        }
    }
}

impl CrashIdConfig {
    /// Parses a configuration document; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CrashIdError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the settings and builds a fingerprinter.
    pub fn build(&self) -> Result<CrashId, CrashIdError> {
        let noise = NoisePrefixes::new(self.noise_prefixes.iter().cloned())?;
        CrashId::new(noise, self.algorithm)
    }
}
