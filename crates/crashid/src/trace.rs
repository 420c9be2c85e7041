//! Parser for stack traces printed by the JVM.
//!
//! Crash reports frequently arrive as the text of `printStackTrace()` rather
//! than as structured frames. [`parse_stack_trace`] rebuilds the occurrence
//! chain from that text so it fingerprints exactly like the live `Throwable`.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::occurrence::{Crash, StackFrame};

const CAUSED_BY: &str = "Caused by: ";
const SUPPRESSED: &str = "Suppressed: ";

/// Errors returned by [`parse_stack_trace`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// The input holds no header line.
    #[error("stack trace is empty")]
    Empty,
}

fn frame_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `at [module/]scope.member(location)`; module prefixes look like
        // `java.base/`, `java.base@11.0.2/` or `app//`.
        Regex::new(r"^at\s+(?:[^\s(]*/)?([\w$.]+)\.([\w$<>]+)\(([^)]*)\)").expect("invalid regex")
    })
}

fn elided_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.\.\.\s+(\d+)\s+more").expect("invalid regex"))
}

fn thread_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^Exception in thread ".*?"\s+"#).expect("invalid regex"))
}

/// Line number encoded in a frame's location, e.g. `Foo.java:42`.
fn parse_location(location: &str) -> i32 {
    if location == "Native Method" {
        return StackFrame::NATIVE_LINE;
    }
    location
        .rsplit_once(':')
        .and_then(|(_, line)| line.parse().ok())
        .unwrap_or(StackFrame::UNKNOWN_LINE)
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parses a printed JVM stack trace into an occurrence chain.
///
/// Lines that are neither frames nor chain markers are ignored, as are
/// `Suppressed:` blocks. A suppressed block ends at the next `Caused by:`
/// that is less indented; in a trace without indentation it ends at the
/// next `Caused by:` of any kind. `... N more` restores the N trailing
/// frames the JVM omitted because the enclosing trace already printed them.
pub fn parse_stack_trace(text: &str) -> Result<Crash, TraceError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or(TraceError::Empty)?.trim();
    let header = thread_header_regex().replace(header, "");

    let mut chain = vec![Crash::new(header)];
    let mut suppressed_indent: Option<usize> = None;

    for raw_line in lines {
        let indent = indent_of(raw_line);
        let line = raw_line.trim();

        if let Some(level) = suppressed_indent {
            // Flattened traces carry no indentation, so a `Caused by:`
            // there always resumes the main chain.
            if line.starts_with(CAUSED_BY) && (indent < level || level == 0) {
                suppressed_indent = None;
            } else {
                continue;
            }
        }

        if let Some(display) = line.strip_prefix(CAUSED_BY) {
            chain.push(Crash::new(display));
        } else if line.starts_with(SUPPRESSED) {
            suppressed_indent = Some(indent);
        } else if let Some(caps) = frame_regex().captures(line) {
            let frame = StackFrame::new(&caps[1], &caps[2], parse_location(&caps[3]));
            if let Some(current) = chain.last_mut() {
                current.frames.push(frame);
            }
        } else if let Some(caps) = elided_regex().captures(line) {
            restore_elided(&mut chain, caps[1].parse().unwrap_or(0));
        }
    }

    debug!(occurrences = chain.len(), "parsed stack trace");

    let mut crash = chain.pop().ok_or(TraceError::Empty)?;
    while let Some(mut enclosing) = chain.pop() {
        enclosing.cause = Some(Box::new(crash));
        crash = enclosing;
    }
    Ok(crash)
}

/// Copies the last `count` frames of the enclosing occurrence onto the
/// current one.
fn restore_elided(chain: &mut [Crash], count: usize) {
    let [.., enclosing, current] = chain else {
        return;
    };
    let start = enclosing.frames.len().saturating_sub(count);
    current.frames.extend_from_slice(&enclosing.frames[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_variants() {
        assert_eq!(parse_location("Foo.java:42"), 42);
        assert_eq!(parse_location("Native Method"), StackFrame::NATIVE_LINE);
        assert_eq!(parse_location("Unknown Source"), StackFrame::UNKNOWN_LINE);
        assert_eq!(parse_location("Foo.java"), StackFrame::UNKNOWN_LINE);
        assert_eq!(parse_location("Unknown Source:12"), 12);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_stack_trace(" \n\t\n").unwrap_err(), TraceError::Empty);
    }

    #[test]
    fn thread_prefix_is_stripped() {
        let crash = parse_stack_trace(
            "Exception in thread \"main\" java.lang.IllegalStateException: boom\n\tat com.example.App.main(App.java:5)",
        )
        .unwrap();
        assert_eq!(crash.display, "java.lang.IllegalStateException: boom");
        assert_eq!(crash.frames, vec![StackFrame::new("com.example.App", "main", 5)]);
    }

    #[test]
    fn module_prefixes_and_special_members() {
        let crash = parse_stack_trace(
            "E\n\
             \tat java.base/java.lang.Thread.run(Thread.java:834)\n\
             \tat app//com.example.Worker.<init>(Worker.java:9)\n\
             \tat java.base@11.0.2/jdk.internal.Foo.lambda$call$0(Foo.java:1)\n\
             \tat com.example.Jni.load(Native Method)",
        )
        .unwrap();
        assert_eq!(
            crash.frames,
            vec![
                StackFrame::new("java.lang.Thread", "run", 834),
                StackFrame::new("com.example.Worker", "<init>", 9),
                StackFrame::new("jdk.internal.Foo", "lambda$call$0", 1),
                StackFrame::new("com.example.Jni", "load", -2),
            ]
        );
    }

    #[test]
    fn elided_frames_are_restored_from_enclosing_trace() {
        let crash = parse_stack_trace(
            "java.lang.RuntimeException: wrapped\n\
             \tat com.example.Service.call(Service.java:20)\n\
             \tat com.example.Main.main(Main.java:3)\n\
             Caused by: java.io.IOException: disk\n\
             \tat com.example.Store.save(Store.java:7)\n\
             \t... 1 more",
        )
        .unwrap();
        let cause = crash.cause.unwrap();
        assert_eq!(
            cause.frames,
            vec![
                StackFrame::new("com.example.Store", "save", 7),
                StackFrame::new("com.example.Main", "main", 3),
            ]
        );
    }

    #[test]
    fn suppressed_blocks_are_skipped() {
        let crash = parse_stack_trace(
            "java.lang.Exception: top\n\
             \tat com.example.A.a(A.java:1)\n\
             \tSuppressed: java.lang.Exception: closing\n\
             \t\tat com.example.R.close(R.java:2)\n\
             \tCaused by: java.lang.Exception: nested\n\
             \t\tat com.example.R.flush(R.java:3)\n\
             Caused by: java.lang.Exception: root\n\
             \tat com.example.B.b(B.java:4)",
        )
        .unwrap();
        assert_eq!(crash.frames, vec![StackFrame::new("com.example.A", "a", 1)]);
        let cause = crash.cause.unwrap();
        assert_eq!(cause.display, "java.lang.Exception: root");
        assert_eq!(cause.frames, vec![StackFrame::new("com.example.B", "b", 4)]);
        assert!(cause.cause.is_none());
    }

    #[test]
    fn unindented_suppressed_block_ends_at_next_cause() {
        let crash = parse_stack_trace(
            "java.lang.Exception: top\n\
             at com.example.A.a(A.java:1)\n\
             Suppressed: java.lang.Exception: closing\n\
             at com.example.R.close(R.java:2)\n\
             Caused by: java.lang.Exception: root\n\
             at com.example.B.b(B.java:4)",
        )
        .unwrap();
        assert_eq!(crash.frames, vec![StackFrame::new("com.example.A", "a", 1)]);
        let cause = crash.cause.unwrap();
        assert_eq!(cause.display, "java.lang.Exception: root");
        assert_eq!(cause.frames, vec![StackFrame::new("com.example.B", "b", 4)]);
    }
}
