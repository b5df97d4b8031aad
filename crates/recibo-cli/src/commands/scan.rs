//! Scan command - extract fields from a single OCR transcript.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use recibo_core::receipt::{ExtractionResult, HeuristicReceiptParser, ReceiptParser};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input transcript file (plain text, one OCR line per line)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Echo the (truncated) raw transcript alongside the fields
    #[arg(long)]
    raw: bool,

    /// Show extraction warnings
    #[arg(long)]
    show_warnings: bool,

    /// Show processing time
    #[arg(long)]
    timing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing transcript: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;

    let parser = HeuristicReceiptParser::with_config(config.extraction.clone());
    let result = parser.parse(&text);

    let output = format_result(&result, args.format, args.raw.then_some(config.output.max_raw_text))?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if args.timing {
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    Ok(())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    raw_limit: Option<usize>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, raw_limit),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_json(result: &ExtractionResult, raw_limit: Option<usize>) -> anyhow::Result<String> {
    let mut json = serde_json::to_value(&result.fields)?;

    if let Some(limit) = raw_limit {
        let truncated: String = result.raw_text.chars().take(limit).collect();
        json["raw_text"] = serde_json::Value::String(truncated);
    }

    Ok(serde_json::to_string_pretty(&json)?)
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["store_name", "total_amount", "date"])?;
    wtr.write_record([
        result.fields.store_name.clone().unwrap_or_default(),
        result
            .fields
            .total_amount
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default(),
        result.fields.date.clone().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    let not_found = "(not found)";
    output.push_str(&format!(
        "Store: {}\n",
        result.fields.store_name.as_deref().unwrap_or(not_found)
    ));
    output.push_str(&format!(
        "Total: {}\n",
        result
            .fields
            .total_amount
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| not_found.to_string())
    ));
    output.push_str(&format!(
        "Date:  {}\n",
        result.fields.date.as_deref().unwrap_or(not_found)
    ));

    output
}
