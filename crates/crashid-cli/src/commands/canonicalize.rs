//! Canonicalize command implementation.

use crate::input::{load_crash_id, load_occurrence};
use crate::InputArgs;

pub fn run(source: InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let crash_id = load_crash_id(&source, None)?;
    let crash = load_occurrence(&source)?;

    let result = crash_id
        .canonicalizer()
        .canonicalize(&crash)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", result.raw);
    Ok(())
}
