//! Inspect command implementation.

use serde_json::json;

use crate::input::{load_crash_id, load_occurrence};
use crate::output::{format_chain, format_json, print_table_header};
use crate::InputArgs;

pub fn run(source: InputArgs, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let crash_id = load_crash_id(&source, None)?;
    let crash = load_occurrence(&source)?;

    if json_output {
        let inspection = crash_id.inspect(&crash)?;
        println!(
            "{}",
            format_json(&json!({
                "occurrence": crash,
                "inspection": inspection,
            }))
        );
        return Ok(());
    }

    print_table_header();
    for row in format_chain(&crash, crash_id.canonicalizer().noise()) {
        println!("{}", row);
    }
    Ok(())
}
