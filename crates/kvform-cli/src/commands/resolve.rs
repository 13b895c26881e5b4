//! Resolve command - extract fields from a single analysis response.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use kvform_core::output::format_text;
use kvform_core::read_fields;

use super::{OutputFormat, ResponseFormat, format_fields, load_config};

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Analysis response file (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Response document format
    #[arg(long, value_enum, default_value = "textract")]
    input_format: ResponseFormat,

    /// Also list key:value pairs on stdout
    #[arg(long)]
    print: bool,

    /// Report anomalies absorbed during resolution
    #[arg(long)]
    show_warnings: bool,
}

pub fn run(args: ResolveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extraction = read_fields(&args.input, args.input_format.into(), &config.resolve)?;

    if extraction.rows.is_empty() {
        warn!("No key/value pairs resolved from {}", args.input.display());
    }

    if args.show_warnings && !extraction.warnings.is_empty() {
        eprintln!("{}", style("Resolution warnings:").yellow());
        for warning in &extraction.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if args.print {
        print!("{}", format_text(&extraction.rows));
    }

    let output = format_fields(&extraction.rows, args.format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!(
        "Resolved {} rows ({} keys, {} skipped) in {:?}",
        extraction.rows.len(),
        extraction.stats.keys,
        extraction.stats.skipped,
        start.elapsed()
    );

    Ok(())
}
