use serde::{Deserialize, Serialize};

/// Statistics gathered while canonicalizing one occurrence chain.
///
/// The report describes the walk; it never feeds into the fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalizationReport {
    /// Occurrences visited, the outermost one included.
    pub occurrences: usize,
    /// Frames inspected across the whole chain.
    pub frames_seen: usize,
    /// Frames that passed the relevance filter.
    pub frames_kept: usize,
}

impl CanonicalizationReport {
    /// Frames dropped as runtime noise.
    pub fn frames_dropped(&self) -> usize {
        self.frames_seen - self.frames_kept
    }
}
