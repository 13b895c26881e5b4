//! Batch command - resolve many analysis responses at once.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use kvform_core::models::config::KvFormConfig;
use kvform_core::{Extraction, InputFormat, read_fields};

use super::{OutputFormat, ResponseFormat, format_fields, load_config};

/// Suffix added to output file stems so outputs never overwrite inputs.
const OUTPUT_SUFFIX: &str = ".fields";

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Response document format
    #[arg(long, value_enum, default_value = "textract")]
    input_format: ResponseFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    output: Option<PathBuf>,
    fields: usize,
    warnings: usize,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_response_file(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let input_format: InputFormat = args.input_format.into();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single_file(&path, input_format, &args, &config) {
            Ok((output, extraction)) => {
                debug!("Wrote output to {}", output.display());
                results.push(FileResult {
                    path,
                    output: Some(output),
                    fields: extraction.rows.len(),
                    warnings: extraction.warnings.len(),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        output: None,
                        fields: 0,
                        warnings: 0,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// JSON files that are not outputs of a previous run.
fn is_response_file(path: &Path) -> bool {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let is_output = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(OUTPUT_SUFFIX));
    is_json && !is_output
}

fn output_path_for(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("response");
    let name = format!("{}{}.{}", stem, OUTPUT_SUFFIX, format.extension());

    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn process_single_file(
    path: &Path,
    input_format: InputFormat,
    args: &BatchArgs,
    config: &KvFormConfig,
) -> anyhow::Result<(PathBuf, Extraction)> {
    let extraction = read_fields(path, input_format, &config.resolve)?;
    let content = format_fields(&extraction.rows, args.format, &config.output)?;

    let output = output_path_for(path, args.output_dir.as_deref(), args.format);
    fs::write(&output, content)?;

    Ok((output, extraction))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "output", "fields", "warnings", "status", "error"])?;

    for result in results {
        let output = result
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let status = if result.error.is_some() { "failed" } else { "success" };

        wtr.write_record([
            result.path.display().to_string().as_str(),
            output.as_str(),
            result.fields.to_string().as_str(),
            result.warnings.to_string().as_str(),
            status,
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
