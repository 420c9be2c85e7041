//! Fingerprint command implementation.

use serde_json::json;

use crate::input::{load_crash_id, load_occurrence};
use crate::output::format_json;
use crate::InputArgs;

pub fn run(
    source: InputArgs,
    raw: bool,
    alg: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let crash_id = load_crash_id(&source, alg.as_deref())?;
    let crash = load_occurrence(&source)?;

    if json_output {
        let inspection = crash_id.inspect(&crash)?;
        let fingerprint = if raw {
            inspection.raw.as_str()
        } else {
            inspection.fingerprint.as_str()
        };
        println!(
            "{}",
            format_json(&json!({
                "fingerprint": fingerprint,
                "raw": raw,
                "algorithm": inspection.algorithm,
                "report": inspection.report,
            }))
        );
    } else {
        println!("{}", crash_id.fingerprint_of(&crash, raw)?);
    }
    Ok(())
}
