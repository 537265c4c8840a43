//! Batch command - run the pipeline over many invoices at once.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{error, warn};

use invmatch_core::{EngineReport, InvoiceEngine};

use super::process::{format_report, OutputFormat};
use super::{acquire_text, load_config, load_inventory};

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern selecting the input files
    #[arg(required = true)]
    input: String,

    /// Inventory snapshot shared by every file (JSON)
    #[arg(short, long)]
    inventory: Option<PathBuf>,

    /// Output directory for per-file reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Per-file report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Keep going when a file fails
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one input file.
#[derive(Serialize)]
struct FileResult {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<EngineReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Aggregate written alongside the per-file reports.
#[derive(Serialize)]
struct BatchSummary<'a> {
    processed: usize,
    failed: usize,
    candidates: usize,
    files: &'a [FileResult],
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let inventory = load_inventory(args.inventory.as_deref())?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "txt" | "png" | "jpg" | "jpeg" | "tiff" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("no files match pattern: {}", args.input);
    }

    println!(
        "{} processing {} files",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let engine = InvoiceEngine::with_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let outcome = process_single_file(&path, &engine, &args, &config, &inventory).await;

        match outcome {
            Ok(report) => results.push(FileResult {
                path: path.clone(),
                report: Some(report),
                error: None,
            }),
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), message);
                    results.push(FileResult {
                        path: path.clone(),
                        report: None,
                        error: Some(message),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), message);
                    anyhow::bail!("Processing failed: {}", message);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    if let Some(ref output_dir) = args.output_dir {
        let summary = BatchSummary {
            processed: results.iter().filter(|r| r.report.is_some()).count(),
            failed: results.iter().filter(|r| r.error.is_some()).count(),
            candidates: candidate_count(&results),
            files: &results,
        };
        fs::write(
            output_dir.join("summary.json"),
            serde_json::to_string_pretty(&summary)?,
        )?;
    }

    print_summary(&results, start.elapsed().as_secs_f64());

    Ok(())
}

fn candidate_count(results: &[FileResult]) -> usize {
    results
        .iter()
        .filter_map(|r| r.report.as_ref())
        .map(|r| r.candidates.len())
        .sum()
}

async fn process_single_file(
    path: &PathBuf,
    engine: &InvoiceEngine,
    args: &BatchArgs,
    config: &invmatch_core::EngineConfig,
    inventory: &[invmatch_core::InventoryItem],
) -> anyhow::Result<EngineReport> {
    let ocr = acquire_text(path, config).await?;
    let report = engine.process_ocr(&ocr, inventory);

    if let Some(ref output_dir) = args.output_dir {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("report");
        let extension = match args.format {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        };
        let out_path = output_dir.join(format!("{stem}.{extension}"));
        fs::write(&out_path, format_report(&report, args.format)?)?;
    }

    Ok(report)
}

fn print_summary(results: &[FileResult], elapsed_secs: f64) {
    let processed = results.iter().filter(|r| r.report.is_some()).count();
    let failed = results.len() - processed;
    let candidates = candidate_count(results);

    println!();
    println!("{}", style("Batch summary").bold());
    println!("  files processed: {processed}");
    println!("  files failed:    {failed}");
    println!("  candidates:      {candidates}");
    println!("  elapsed:         {elapsed_secs:.1}s");

    for result in results {
        if let Some(ref message) = result.error {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                result.path.display(),
                message
            );
        }
    }
}
