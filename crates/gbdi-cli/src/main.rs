//! # gbdi-cli
//!
//! Command-line interface for the GBDI data converters.
//!
//! One invocation runs one converter (or one split) over one file. Exit code
//! 0 means the run finished, possibly with per-row warnings; a non-zero exit
//! means the input was structurally unreadable or the output could not be
//! written.

mod config;

use anyhow::bail;
use clap::{Parser, Subcommand};
use config::{CliConfig, Strictness};
use gbdi_pipeline::{Runner, split_file};
use gbdi_providers::{available_formats, converter_for};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gbdi")]
#[command(about = "Convert building-LCA data exports into the GBDI ingest schema")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a source export into the ingest schema
    Convert {
        /// Input file path
        input: PathBuf,

        /// Source format (see `gbdi formats`)
        #[arg(short, long)]
        format: String,

        /// Output file path (default: input path with a .json extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Validation strictness
        #[arg(short, long)]
        strictness: Option<Strictness>,
    },

    /// Split a converted JSON array into fixed-size chunk files
    Split {
        /// Converted JSON file
        input: PathBuf,

        /// Maximum elements per chunk
        #[arg(short = 'n', long)]
        chunk_size: Option<usize>,
    },

    /// List the supported source formats
    Formats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Commands::Convert {
            input,
            format,
            output,
            strictness,
        } => convert(&config, &input, &format, output, strictness),
        Commands::Split { input, chunk_size } => {
            let chunk_size = chunk_size.or(config.chunk_size).unwrap_or(50);
            let report = split_file(&input, chunk_size)?;
            println!(
                "split {} elements into {} chunk(s)",
                report.total_elements,
                report.chunks.len()
            );
            Ok(())
        }
        Commands::Formats => {
            for name in available_formats() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn convert(
    config: &CliConfig,
    input: &PathBuf,
    format: &str,
    output: Option<PathBuf>,
    strictness: Option<Strictness>,
) -> anyhow::Result<()> {
    let Some(converter) = converter_for(format) else {
        bail!(
            "unknown format '{format}'; supported formats: {}",
            available_formats().join(", ")
        );
    };

    // Explicit --output wins; otherwise the configured output directory with
    // the input's stem; otherwise next to the input.
    let output = output.or_else(|| {
        config
            .output_dir
            .as_ref()
            .zip(input.file_stem())
            .map(|(dir, stem)| dir.join(stem).with_extension("json"))
    });

    let strictness = strictness.or(config.strictness).unwrap_or_default();
    let runner = Runner::new().with_strictness(strictness.into());
    let report = runner.run(converter.as_ref(), input, output.as_deref())?;

    println!(
        "{}: {} row(s) -> {} project(s), {} skipped -> {}",
        report.format,
        report.rows_read,
        report.projects_written,
        report.skipped(),
        report.output.display()
    );
    Ok(())
}
