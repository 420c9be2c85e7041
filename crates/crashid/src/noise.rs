use crate::validation::ValidationError;

/// Scope prefixes of the JVM and Android runtimes, in match order.
pub const JVM_NOISE_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "android.",
    "com.android.internal.",
    "dalvik.system.",
];

/// Ordered set of scope prefixes whose frames carry no grouping signal.
///
/// Frames defined inside the platform runtime differ between OS and VM
/// versions without indicating a different bug, so they are dropped before
/// canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoisePrefixes {
    prefixes: Vec<String>,
}

impl NoisePrefixes {
    /// Builds a prefix set, rejecting empty entries.
    pub fn new<I, S>(prefixes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if let Some(index) = prefixes.iter().position(|p| p.is_empty()) {
            return Err(ValidationError::EmptyPrefix { index });
        }
        Ok(Self { prefixes })
    }

    /// The JVM/Android runtime set.
    pub fn jvm() -> Self {
        Self {
            prefixes: JVM_NOISE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// A set that keeps every frame.
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// Returns `true` when frames defined in `scope` contribute to a fingerprint.
    pub fn is_relevant(&self, scope: &str) -> bool {
        !self.prefixes.iter().any(|p| scope.starts_with(p.as_str()))
    }

    /// Configured prefixes, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for NoisePrefixes {
    fn default() -> Self {
        Self::jvm()
    }
}
