//! Batch processing command for multiple documents.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, error, warn};

use docproc_core::Document;

use super::{build_processor, load_config, write_output};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// JSON files, glob patterns, or `-` for stdin. Each holds one document or an array of them.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel workers (overrides config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Skip drug label lookups
    #[arg(long)]
    offline: bool,

    /// Skip unreadable inputs instead of failing
    #[arg(long)]
    continue_on_error: bool,

    /// Print batch counters to stderr
    #[arg(long)]
    summary: bool,
}

/// A batch input file: one document or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentInput {
    Many(Vec<Document>),
    One(Document),
}

impl DocumentInput {
    fn into_documents(self) -> Vec<Document> {
        match self {
            DocumentInput::Many(docs) => docs,
            DocumentInput::One(doc) => vec![doc],
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if let Some(jobs) = args.jobs {
        config.dispatcher.workers = jobs;
    }

    let mut documents = Vec::new();
    for input in &args.inputs {
        match read_input(input) {
            Ok(docs) => {
                debug!("Read {} documents from {}", docs.len(), input);
                documents.extend(docs);
            }
            Err(e) if args.continue_on_error => {
                warn!("Failed to read {}: {}", input, e);
            }
            Err(e) => {
                error!("Failed to read {}: {}", input, e);
                return Err(e);
            }
        }
    }

    let processor = build_processor(config, args.offline)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!(
        "Processing {} documents with {} workers",
        documents.len(),
        processor.workers()
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let (output, report) = processor.process_with_report(documents).await;

    pb.finish_and_clear();

    write_output(&output, args.output.as_ref())?;

    if args.summary {
        eprintln!(
            "{} Processed {} documents in {:?}",
            style("✓").green(),
            report.submitted + report.skipped_unknown,
            start.elapsed()
        );
        eprintln!(
            "   {} succeeded, {} failed, {} skipped",
            style(report.succeeded).green(),
            style(report.failed).red(),
            style(report.skipped_unknown).yellow()
        );
    }

    Ok(())
}

/// Read documents from `-` (stdin), a file path, or a glob pattern.
fn read_input(input: &str) -> anyhow::Result<Vec<Document>> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return parse_documents(&buf);
    }

    let path = Path::new(input);
    if path.exists() {
        return read_file(path);
    }

    let paths: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
    if paths.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", input);
    }

    let mut documents = Vec::new();
    for path in paths {
        documents.extend(read_file(&path)?);
    }
    Ok(documents)
}

fn read_file(path: &Path) -> anyhow::Result<Vec<Document>> {
    let content = fs::read_to_string(path)?;
    parse_documents(&content)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

fn parse_documents(json: &str) -> anyhow::Result<Vec<Document>> {
    let input: DocumentInput = serde_json::from_str(json)?;
    Ok(input.into_documents())
}
