//! crashid CLI - compute crash fingerprints from printed or JSON stack traces.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{canonicalize, fingerprint, inspect};

#[derive(Parser)]
#[command(name = "crashid")]
#[command(about = "Deterministic crash fingerprints for grouping duplicate reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the occurrence comes from and how it is fingerprinted.
#[derive(Args)]
pub struct InputArgs {
    /// Input file (or stdin if not provided)
    pub input: Option<String>,
    /// Input is a JSON occurrence instead of a printed stack trace
    #[arg(long)]
    pub json_input: bool,
    /// JSON configuration file (noise prefixes, algorithm)
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint of a stack trace
    Fingerprint {
        #[command(flatten)]
        source: InputArgs,
        /// Print the canonical text instead of its digest
        #[arg(long)]
        raw: bool,
        /// Digest algorithm (sha-1, sha-256); overrides the config file
        #[arg(long)]
        alg: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the canonical text for a stack trace
    Canonicalize {
        #[command(flatten)]
        source: InputArgs,
    },
    /// Show the parsed occurrence chain and which frames count
    Inspect {
        #[command(flatten)]
        source: InputArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fingerprint {
            source,
            raw,
            alg,
            json,
        } => fingerprint::run(source, raw, alg, json),
        Commands::Canonicalize { source } => canonicalize::run(source),
        Commands::Inspect { source, json } => inspect::run(source, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
