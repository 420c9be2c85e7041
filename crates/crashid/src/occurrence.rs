use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Capability interface over a raised error.
///
/// Host applications implement this for their own error types; the
/// fingerprinting code never sees anything beyond these three accessors.
pub trait Occurrence {
    /// Type name plus message, as the platform renders the error.
    fn display(&self) -> Cow<'_, str>;

    /// Call stack, innermost frame first.
    fn frames(&self) -> &[StackFrame];

    /// The underlying error that triggered this one, if any.
    fn cause(&self) -> Option<&dyn Occurrence>;
}

/// One call-site within an occurrence's stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    /// Fully-qualified defining scope, e.g. `com.example.Foo`.
    pub scope: String,
    /// Method or function name.
    pub member: String,
    /// Source line; negative for unknown or native positions.
    #[serde(default = "unknown_line")]
    pub line: i32,
}

fn unknown_line() -> i32 {
    StackFrame::UNKNOWN_LINE
}

impl StackFrame {
    /// Line number reported when the source position is not known.
    pub const UNKNOWN_LINE: i32 = -1;
    /// Line number reported for native methods.
    pub const NATIVE_LINE: i32 = -2;

    /// Creates a frame.
    pub fn new(scope: impl Into<String>, member: impl Into<String>, line: i32) -> Self {
        Self {
            scope: scope.into(),
            member: member.into(),
            line,
        }
    }
}

/// Owned occurrence record.
///
/// Chains built from `Crash` values are acyclic by construction, since each
/// cause is exclusively owned by the occurrence it triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crash {
    /// Type name plus message.
    pub display: String,
    /// Call stack, innermost frame first.
    #[serde(default)]
    pub frames: Vec<StackFrame>,
    /// Underlying cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<Crash>>,
}

impl Crash {
    /// Creates an occurrence with no frames and no cause.
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Appends a frame below the existing ones.
    pub fn with_frame(mut self, scope: impl Into<String>, member: impl Into<String>, line: i32) -> Self {
        self.frames.push(StackFrame::new(scope, member, line));
        self
    }

    /// Sets the underlying cause, replacing any previous one.
    pub fn with_cause(mut self, cause: Crash) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Number of occurrences in the chain, including this one.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut current = self;
        while let Some(cause) = current.cause.as_deref() {
            len += 1;
            current = cause;
        }
        len
    }
}

impl Occurrence for Crash {
    fn display(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    fn cause(&self) -> Option<&dyn Occurrence> {
        self.cause.as_deref().map(|c| c as &dyn Occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_line_deserializes_as_unknown() {
        let frame: StackFrame =
            serde_json::from_str(r#"{"scope":"com.example.Foo","member":"bar"}"#).unwrap();
        assert_eq!(frame.line, StackFrame::UNKNOWN_LINE);
    }

    #[test]
    fn crash_round_trips_through_json_without_cause_field() {
        let crash = Crash::new("java.lang.IllegalStateException").with_frame("com.example.App", "run", 3);
        let json = serde_json::to_string(&crash).unwrap();
        assert_eq!(
            json,
            r#"{"display":"java.lang.IllegalStateException","frames":[{"scope":"com.example.App","member":"run","line":3}]}"#
        );
    }

    #[test]
    fn chain_len_counts_every_cause() {
        let crash = Crash::new("a").with_cause(Crash::new("b").with_cause(Crash::new("c")));
        assert_eq!(crash.chain_len(), 3);
        assert_eq!(crash.cause().unwrap().display(), "b");
    }
}
