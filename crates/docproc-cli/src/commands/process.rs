//! Process command - extract a record from a single document file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use docproc_core::{Document, GroupedOutput, NO_INFORMATION};

use super::{build_processor, load_config, write_output};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (invoice, medical_report, news_article)
    #[arg(short = 't', long = "type")]
    doc_type: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip drug label lookups
    #[arg(long)]
    offline: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let processor = build_processor(config, args.offline)?;
    if let Err(e) = processor.registry().resolve(&args.doc_type) {
        eprintln!(
            "{} {}; nothing will be extracted (known types: {})",
            style("!").yellow(),
            e,
            processor.registry().tags().join(", ")
        );
    }

    info!("Processing file: {}", args.input.display());
    let content = fs::read_to_string(&args.input)?;

    let output = processor
        .process(vec![Document::new(args.doc_type, content)])
        .await;

    match args.format {
        OutputFormat::Json => write_output(&output, args.output.as_ref())?,
        OutputFormat::Text => {
            let text = format_text(&output);
            match &args.output {
                Some(path) => fs::write(path, text)?,
                None => print!("{}", text),
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Human-readable summary of a grouped output.
pub fn format_text(output: &GroupedOutput) -> String {
    let mut text = String::new();

    for invoice in &output.invoices {
        text.push_str(&format!("Invoice: {}\n", or_dash(&invoice.invoice_number)));
        text.push_str(&format!("Date: {}\n", or_dash(&invoice.date)));
        text.push_str(&format!("Customer: {}\n", or_dash(&invoice.customer_name)));
        text.push_str(&format!("Address: {}\n", or_dash(&invoice.address)));
        for item in &invoice.items {
            text.push_str(&format!("  - {}: ${}\n", item.item, item.price));
        }
        text.push_str(&format!("Total: ${}\n\n", invoice.total_amount));
    }

    for report in &output.medical_reports {
        text.push_str(&format!("Patient: {}\n", or_dash(&report.patient_name)));
        text.push_str(&format!("Date of Visit: {}\n", or_dash(&report.date_of_visit)));
        text.push_str(&format!("Diagnosis: {}\n", or_dash(&report.diagnosis)));
        for p in &report.prescriptions {
            text.push_str(&format!("  - {}: {}\n", p.drug, p.dosage));
            let info = p.drug_info.as_deref().unwrap_or(NO_INFORMATION);
            text.push_str(&format!("    {}\n", info));
        }
        for r in &report.recommendations {
            text.push_str(&format!("  * {}\n", r));
        }
        text.push('\n');
    }

    for article in &output.news_articles {
        text.push_str(&format!("Title: {}\n", or_dash(&article.title)));
        text.push_str(&format!("By {} on {}\n", or_dash(&article.author), or_dash(&article.date)));
        for point in &article.key_points {
            text.push_str(&format!("  - {}\n", point));
        }
        text.push('\n');
    }

    if text.is_empty() {
        text.push_str("No records extracted\n");
    }

    text
}
