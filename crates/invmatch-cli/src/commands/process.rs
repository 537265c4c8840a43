//! Process command - extract and match candidates from a single invoice.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use invmatch_core::{Confidence, EngineReport, InvoiceEngine, SuggestedAction};

use super::{acquire_text, load_config, load_inventory};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt OCR text, or an image for the configured backend)
    #[arg(required = true)]
    input: PathBuf,

    /// Inventory snapshot (JSON array of {id, name, quantity, unit})
    #[arg(short, long)]
    inventory: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Echo the acquired OCR text to stderr
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full report as pretty-printed JSON
    Json,
    /// One row per candidate
    Csv,
    /// Human-readable summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let ocr = acquire_text(&args.input, &config).await?;
    if args.show_text {
        eprintln!("{}", style("Recognized text:").bold());
        eprintln!("{}", ocr.text);
    }

    let inventory = load_inventory(args.inventory.as_deref())?;

    let engine = InvoiceEngine::with_config(&config);
    let report = engine.process_ocr(&ocr, &inventory);

    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {}",
            style("Wrote").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    Ok(())
}

/// Render a report in the requested format.
pub fn format_report(report: &EngineReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &EngineReport) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "name",
        "quantity",
        "unit",
        "price",
        "confidence",
        "score",
        "suggested_action",
        "inventory_item_id",
    ])?;

    for (candidate, m) in report.candidates.iter().zip(&report.matches) {
        writer.write_record([
            candidate.name.as_str(),
            &candidate.quantity.to_string(),
            candidate.unit.as_str(),
            candidate.price.as_deref().unwrap_or(""),
            confidence_label(candidate.confidence),
            &format!("{:.2}", m.score),
            action_label(m.suggested_action),
            &m.inventory_item_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ])?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn format_text(report: &EngineReport) -> String {
    let mut out = String::new();

    if !report.vendor.name.is_empty() {
        out.push_str(&format!("Vendor:  {}\n", report.vendor.name));
    }
    if !report.vendor.invoice_number.is_empty() {
        out.push_str(&format!("Invoice: {}\n", report.vendor.invoice_number));
    }
    out.push('\n');

    if report.candidates.is_empty() {
        out.push_str("No candidate items detected.\n");
        return out;
    }

    for (candidate, m) in report.candidates.iter().zip(&report.matches) {
        let price = candidate
            .price
            .as_deref()
            .map(|p| format!(" @ {p}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<30} {:>8} {:<8}{price}\n",
            candidate.name, candidate.quantity, candidate.unit
        ));
        out.push_str(&format!(
            "    -> {} (score {:.2})\n",
            action_label(m.suggested_action),
            m.score
        ));
    }

    out
}

fn action_label(action: SuggestedAction) -> &'static str {
    match action {
        SuggestedAction::Update => "update",
        SuggestedAction::Review => "review",
        SuggestedAction::AddNew => "add_new",
    }
}

fn confidence_label(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::VeryLow => "very_low",
        Confidence::Low => "low",
        Confidence::Medium => "medium",
        Confidence::High => "high",
    }
}
