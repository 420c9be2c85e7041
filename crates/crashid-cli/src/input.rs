//! Input loading shared by all commands.

use crashid::{parse_stack_trace, Crash, CrashId, CrashIdConfig, DigestAlg};
use std::io::{self, Read};
use tracing::debug;

use crate::InputArgs;

/// Reads the input file, or stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Loads the occurrence described by `args`.
pub fn load_occurrence(args: &InputArgs) -> Result<Crash, Box<dyn std::error::Error>> {
    let text = read_input(args.input.as_deref())?;
    let crash = if args.json_input {
        serde_json::from_str(&text).map_err(|e| format!("Invalid JSON occurrence: {}", e))?
    } else {
        parse_stack_trace(&text).map_err(|e| format!("Invalid stack trace: {}", e))?
    };
    debug!(occurrences = crash.chain_len(), "loaded occurrence");
    Ok(crash)
}

/// Builds a fingerprinter from the config file, with `alg` taking precedence.
pub fn load_crash_id(
    args: &InputArgs,
    alg: Option<&str>,
) -> Result<CrashId, Box<dyn std::error::Error>> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {}: {}", path, e))?;
            CrashIdConfig::from_json(&json)?
        }
        None => CrashIdConfig::default(),
    };
    if let Some(alg) = alg {
        config.algorithm = alg.parse::<DigestAlg>()?;
    }
    Ok(config.build()?)
}
