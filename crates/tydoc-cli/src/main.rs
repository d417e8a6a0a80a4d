use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tydoc_core::{DocOptions, generate_doc};

/// Extract documentation from a TypeScript source file as JSON.
#[derive(Debug, Parser)]
#[command(name = "tydoc", version, about)]
struct Args {
    /// TypeScript file to document.
    file: PathBuf,

    /// Error on syntax the extractor does not understand instead of
    /// skipping it.
    #[arg(long)]
    strict: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Initialise the tracing subscriber from `TYDOC_LOG`, falling back to
/// `RUST_LOG`. Does nothing when neither is set, so normal runs pay no
/// logging cost. Output goes to stderr to keep stdout clean for JSON.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let has_tydoc_log = std::env::var("TYDOC_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tydoc_log && !has_rust_log {
        return;
    }
    let filter = if let Ok(value) = std::env::var("TYDOC_LOG") {
        EnvFilter::builder().parse_lossy(value)
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let options = DocOptions { strict: args.strict };
    let nodes = generate_doc(&args.file, &options)
        .with_context(|| format!("failed to document {}", args.file.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&nodes)
    } else {
        serde_json::to_string(&nodes)
    }
    .context("failed to serialize documentation")?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write output")?;
        }
    }
    Ok(())
}
