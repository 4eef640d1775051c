//! CLI entry point for the KPI processor.
//!
//! Scores a single ticket export, or several exports merged into one
//! multi-period run, and writes the processed and summary tables.

use anyhow::Result;
use clap::{Parser, Subcommand};
use kpi_processor::{
    cascade::{FilterOptions, FilterSelection, Selection},
    config::Settings,
    ingest::{load_source, load_sources},
    output::{export, print_json, print_pretty},
    pipeline::{
        self,
        types::{Mode, Month, PipelineOutput, PipelineStats, SummaryRecord},
    },
    table::RawTable,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "kpi_processor")]
#[command(about = "Scores network trouble tickets and summarizes KPI results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single ticket export (CSV or workbook, file or URL)
    Process {
        #[arg(value_name = "FILE_OR_URL")]
        input: String,

        /// Directory for the exported CSVs (defaults to KPI_OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Gzip compress the exported CSVs
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Log the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Merge several exports and summarize them per month and year
    ProcessMany {
        #[arg(value_name = "FILE_OR_URL", required = true, num_args = 1..)]
        inputs: Vec<String>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum number of files loaded at once
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,

        /// Month name or number, or "All"
        #[arg(long, default_value = "All")]
        month: Selection<Month>,

        #[arg(long, default_value = "All")]
        year: Selection<i32>,

        #[arg(long, default_value = "All")]
        area: Selection<String>,

        #[arg(long, default_value = "All")]
        regional: Selection<String>,

        #[arg(long, default_value = "All")]
        nop: Selection<String>,

        #[arg(long, default_value_t = false)]
        gzip: bool,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the filter values available for the merged exports
    Options {
        #[arg(value_name = "FILE_OR_URL", required = true, num_args = 1..)]
        inputs: Vec<String>,

        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,

        /// Narrows the Regional options
        #[arg(long, default_value = "All")]
        area: Selection<String>,

        /// Narrows the NOP options
        #[arg(long, default_value = "All")]
        regional: Selection<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let settings = Settings::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let file_appender =
        tracing_appender::rolling::daily(settings.log_dir(), settings.log_file_name());
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            gzip,
            json,
        } => {
            let table = load_source(&input).await?;
            let output = pipeline::run(&table, Mode::Single)?;

            let dir = settings.resolve_output_dir(output_dir);
            export(&dir, &output.processed, &output.summary, output.mode, gzip)?;
            report(&output.summary, &output.stats, json)?;
        }
        Commands::ProcessMany {
            inputs,
            output_dir,
            concurrency,
            month,
            year,
            area,
            regional,
            nop,
            gzip,
            json,
        } => {
            let output = run_many(&inputs, concurrency).await?;

            let selection = FilterSelection {
                month,
                year,
                area,
                regional,
                nop,
            };
            let summary = selection.apply(&output.summary);
            info!(
                groups = output.summary.len(),
                kept = summary.len(),
                "Summary filter applied"
            );

            let dir = settings.resolve_output_dir(output_dir);
            export(&dir, &output.processed, &summary, output.mode, gzip)?;
            report(&summary, &output.stats, json)?;
        }
        Commands::Options {
            inputs,
            concurrency,
            area,
            regional,
        } => {
            let output = run_many(&inputs, concurrency).await?;

            let selection = FilterSelection {
                area,
                regional,
                ..Default::default()
            };
            let options = FilterOptions::from_processed(&output.processed, &selection);
            print_json(&options)?;
        }
    }

    Ok(())
}

/// Loads every input, concatenates them in the given order and scores the
/// result in multi-file mode.
#[tracing::instrument(skip(inputs), fields(files = inputs.len()))]
async fn run_many(inputs: &[String], concurrency: usize) -> Result<PipelineOutput> {
    let tables = load_sources(inputs, concurrency).await?;
    let table = RawTable::concat(tables);
    info!(rows = table.len(), "Inputs merged");
    Ok(pipeline::run(&table, Mode::Multi)?)
}

fn report(summary: &[SummaryRecord], stats: &PipelineStats, json: bool) -> Result<()> {
    if json {
        print_json(&summary)?;
    }
    print_pretty(stats);
    Ok(())
}
