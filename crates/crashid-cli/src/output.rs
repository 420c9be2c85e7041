//! Output formatting utilities.

use crashid::{Crash, NoisePrefixes, Occurrence};
use serde::Serialize;

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats one occurrence of a chain as a table row.
pub fn format_table_row(depth: usize, occurrence: &dyn Occurrence, noise: &NoisePrefixes) -> String {
    let frames = occurrence.frames();
    let kept = frames.iter().filter(|f| noise.is_relevant(&f.scope)).count();

    format!(
        "{:<6} {:<7} {:<7} {}",
        depth,
        frames.len(),
        kept,
        truncate(&occurrence.display(), 60)
    )
}

/// Formats every occurrence of the chain, outermost first.
pub fn format_chain(crash: &Crash, noise: &NoisePrefixes) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current: Option<&dyn Occurrence> = Some(crash);
    while let Some(occurrence) = current {
        rows.push(format_table_row(rows.len(), occurrence, noise));
        current = occurrence.cause();
    }
    rows
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<6} {:<7} {:<7} {}", "DEPTH", "FRAMES", "KEPT", "DISPLAY");
    println!("{}", "-".repeat(80));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
