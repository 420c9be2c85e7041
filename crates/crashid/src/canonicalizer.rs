use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::noise::NoisePrefixes;
use crate::occurrence::{Occurrence, StackFrame};
use crate::report::CanonicalizationReport;
use std::collections::HashSet;
use std::fmt;

/// Precedes every relevant frame.
pub const FRAME_SEPARATOR: char = '/';
/// Separates a frame's scope from its member name.
pub const METHOD_MARKER: char = '#';
/// Separates a frame's member name from its line number.
pub const LINE_MARKER: char = '@';
/// Precedes the canonical text of an underlying cause.
pub const CAUSE_MARKER: char = '<';

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// The cause chain revisits an occurrence already walked.
    #[error("cause chain loops back after {depth} occurrences")]
    CyclicCause {
        /// Occurrences walked before the repeat was detected.
        depth: usize,
    },
}

/// Canonical text of an occurrence chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFingerprint(String);

impl RawFingerprint {
    /// Borrows the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the canonical text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RawFingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// Canonical text for the input chain.
    pub raw: RawFingerprint,
    /// Statistics describing the walk.
    pub report: CanonicalizationReport,
}

/// Canonicalizer that emits deterministic fingerprint text.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    noise: NoisePrefixes,
}

impl Canonicalizer {
    /// Creates a canonicalizer that drops frames matching `noise`.
    pub fn new(noise: NoisePrefixes) -> Self {
        Self { noise }
    }

    /// Noise prefixes bound to this canonicalizer.
    pub fn noise(&self) -> &NoisePrefixes {
        &self.noise
    }

    /// Serializes `occurrence` and its cause chain into canonical text.
    ///
    /// The chain is walked iteratively; an occurrence reached twice (same
    /// address and same concrete type) fails the call with
    /// [`CanonicalizationError::CyclicCause`].
    pub fn canonicalize(
        &self,
        occurrence: &dyn Occurrence,
    ) -> Result<CanonicalizationResult, CanonicalizationError> {
        let mut text = String::new();
        let mut report = CanonicalizationReport::default();
        // Keyed on the wide pointer: a wrapper and the cause stored at its
        // offset 0 share an address but not a vtable.
        let mut visited = HashSet::new();
        let mut current = occurrence;

        loop {
            if !visited.insert(std::ptr::from_ref(current)) {
                warn!(depth = report.occurrences, "cause chain is cyclic");
                return Err(CanonicalizationError::CyclicCause {
                    depth: report.occurrences,
                });
            }
            report.occurrences += 1;

            self.append_occurrence(current, &mut text, &mut report);

            match current.cause() {
                Some(cause) => {
                    text.push(CAUSE_MARKER);
                    current = cause;
                }
                None => break,
            }
        }

        debug!(
            occurrences = report.occurrences,
            frames_seen = report.frames_seen,
            frames_kept = report.frames_kept,
            "canonicalized occurrence chain"
        );

        Ok(CanonicalizationResult {
            raw: RawFingerprint(text),
            report,
        })
    }

    fn append_occurrence(
        &self,
        occurrence: &dyn Occurrence,
        text: &mut String,
        report: &mut CanonicalizationReport,
    ) {
        text.push_str(&occurrence.display());

        for frame in occurrence.frames() {
            report.frames_seen += 1;
            if !self.noise.is_relevant(&frame.scope) {
                trace!(scope = %frame.scope, member = %frame.member, "dropping runtime frame");
                continue;
            }
            report.frames_kept += 1;
            append_frame(frame, text);
        }
    }
}

fn append_frame(frame: &StackFrame, text: &mut String) {
    text.push(FRAME_SEPARATOR);
    text.push_str(&frame.scope);
    text.push(METHOD_MARKER);
    text.push_str(&frame.member);
    text.push(LINE_MARKER);
    text.push_str(&frame.line.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::Crash;
    use std::borrow::Cow;
    use std::cell::Cell;

    fn npe() -> Crash {
        Crash::new("java.lang.NullPointerException").with_frame("com.example.Foo", "bar", 42)
    }

    fn raw(occurrence: &dyn Occurrence) -> String {
        Canonicalizer::default()
            .canonicalize(occurrence)
            .unwrap()
            .raw
            .into_string()
    }

    #[test]
    fn single_relevant_frame() {
        assert_eq!(raw(&npe()), "java.lang.NullPointerException/com.example.Foo#bar@42");
    }

    #[test]
    fn negative_lines_keep_their_sign() {
        let crash = Crash::new("E").with_frame("com.example.Jni", "call", StackFrame::NATIVE_LINE);
        assert_eq!(raw(&crash), "E/com.example.Jni#call@-2");
    }

    #[test]
    fn empty_stack_yields_display_only() {
        assert_eq!(raw(&Crash::new("java.lang.OutOfMemoryError")), "java.lang.OutOfMemoryError");
    }

    #[test]
    fn cause_is_appended_after_marker() {
        let crash = Crash::new("outer")
            .with_frame("com.example.A", "a", 1)
            .with_cause(Crash::new("inner").with_frame("com.example.B", "b", 2));
        assert_eq!(raw(&crash), "outer/com.example.A#a@1<inner/com.example.B#b@2");
    }

    #[test]
    fn report_counts_dropped_frames() {
        let crash = npe()
            .with_frame("java.lang.Thread", "run", 748)
            .with_cause(Crash::new("inner").with_frame("android.os.Looper", "loop", 1));
        let result = Canonicalizer::default().canonicalize(&crash).unwrap();
        assert_eq!(result.report.occurrences, 2);
        assert_eq!(result.report.frames_seen, 3);
        assert_eq!(result.report.frames_kept, 1);
        assert_eq!(result.report.frames_dropped(), 2);
    }

    #[test]
    fn custom_noise_set_replaces_defaults() {
        let noise = NoisePrefixes::new(["com.example."]).unwrap();
        let crash = npe().with_frame("java.util.ArrayList", "get", 10);
        let result = Canonicalizer::new(noise).canonicalize(&crash).unwrap();
        assert_eq!(
            result.raw.as_str(),
            "java.lang.NullPointerException/java.util.ArrayList#get@10"
        );
    }

    struct Looping<'a> {
        name: &'static str,
        frames: Vec<StackFrame>,
        cause: Cell<Option<&'a Looping<'a>>>,
    }

    impl Occurrence for Looping<'_> {
        fn display(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.name)
        }

        fn frames(&self) -> &[StackFrame] {
            &self.frames
        }

        fn cause(&self) -> Option<&dyn Occurrence> {
            self.cause.get().map(|c| c as &dyn Occurrence)
        }
    }

    #[test]
    fn cyclic_chain_is_rejected() {
        let a = Looping {
            name: "a",
            frames: vec![StackFrame::new("com.example.A", "a", 1)],
            cause: Cell::new(None),
        };
        let b = Looping {
            name: "b",
            frames: Vec::new(),
            cause: Cell::new(None),
        };
        a.cause.set(Some(&b));
        b.cause.set(Some(&a));

        let CanonicalizationError::CyclicCause { depth } =
            Canonicalizer::default().canonicalize(&a).unwrap_err();
        // The entry reference may carry a different vtable than the one
        // produced by `cause()`, so detection can take one more lap.
        assert!((2..=4).contains(&depth));
    }

    struct Wrapped {
        inner: Crash,
    }

    impl Occurrence for Wrapped {
        fn display(&self) -> Cow<'_, str> {
            Cow::Borrowed("com.example.WrappedException")
        }

        fn frames(&self) -> &[StackFrame] {
            &[]
        }

        fn cause(&self) -> Option<&dyn Occurrence> {
            Some(&self.inner)
        }
    }

    #[test]
    fn wrapper_sharing_its_cause_address_is_not_a_cycle() {
        let wrapped = Wrapped {
            inner: npe(),
        };
        assert_eq!(
            std::ptr::from_ref(&wrapped).cast::<()>(),
            std::ptr::from_ref(&wrapped.inner).cast::<()>()
        );

        let result = Canonicalizer::default().canonicalize(&wrapped).unwrap();
        assert_eq!(
            result.raw.as_str(),
            "com.example.WrappedException<java.lang.NullPointerException/com.example.Foo#bar@42"
        );
        assert_eq!(result.report.occurrences, 2);
    }

    #[test]
    fn self_cause_is_rejected() {
        let a = Looping {
            name: "a",
            frames: Vec::new(),
            cause: Cell::new(None),
        };
        a.cause.set(Some(&a));

        let CanonicalizationError::CyclicCause { depth } =
            Canonicalizer::default().canonicalize(&a).unwrap_err();
        assert!((1..=2).contains(&depth));
    }
}
