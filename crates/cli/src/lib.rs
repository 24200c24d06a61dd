//! CLI for the WMT score board.
//!
//! This crate provides the command-line rendering surface: table dumps,
//! single views as JSON or markdown, and the full `report` run.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wmt_scoreboard_core::{compute_view, Dataset, Metric, Selection, ViewKind};
use wmt_scoreboard_report::{io, load_source, markdown, run_and_write_all, Source};

use crate::config::ScoreboardConfig;

/// WMT score board CLI.
#[derive(Parser, Debug)]
#[command(name = "scoreboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./scoreboard.toml when present).
    #[arg(short, long, global = true, env = "SCOREBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the dataset comes from.
#[derive(clap::Args, Debug, Clone)]
pub struct DataArgs {
    /// Built-in source: dashboard, tasks or visualizations.
    #[arg(short, long)]
    pub source: Option<Source>,

    /// JSON file of raw wide tables; overrides the source.
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

/// Output format for a single view.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Chart spec as pretty JSON.
    Json,
    /// Chart spec as a markdown table.
    Markdown,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dataset as a wide markdown table.
    Table {
        /// Dataset to print.
        #[command(flatten)]
        data: DataArgs,
    },

    /// Compose one view and print it.
    View {
        /// View kind: grouped_bar, metric_bar, box_plot, scatter or correlation.
        kind: ViewKind,

        /// Model to include (repeatable; all when omitted).
        #[arg(short, long = "model")]
        models: Vec<String>,

        /// Metric to show (BLEU, ChrF or COMET).
        #[arg(long)]
        metric: Option<Metric>,

        /// Language pair to include (repeatable; all when omitted).
        #[arg(short, long = "pair")]
        pairs: Vec<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Dataset to compose from.
        #[command(flatten)]
        data: DataArgs,
    },

    /// Render every page and write results to the output directory.
    ///
    /// Writes:
    /// - raw/<page>_<view>.json - Individual view results
    /// - all_views.json - Combined JSON file
    /// - summary.md - Markdown summary
    /// - report.md - Markdown tables per view
    Report {
        /// Output directory override.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show configuration.
    Status {
        /// Show detailed status information.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Build a selection from CLI flags. Empty pair list means all pairs.
pub fn selection_from_args(models: &[String], metric: Option<Metric>, pairs: &[String]) -> Selection {
    let mut selection = Selection::all().with_models(models.iter().cloned());
    selection.metric = metric;
    if !pairs.is_empty() {
        selection = selection.with_pairs(pairs.iter().cloned());
    }
    selection
}

fn init_logging(config: &ScoreboardConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_data(args: &DataArgs, config: &ScoreboardConfig) -> Result<Dataset> {
    if let Some(path) = args.data.as_ref().or(config.data_file.as_ref()) {
        return io::load_tables_file(path)
            .with_context(|| format!("failed to load tables from {}", path.display()));
    }
    let source = args.source.unwrap_or(config.default_source);
    debug!(source = %source, "Loading built-in source");
    Ok(load_source(source)?)
}

/// Run the CLI with the process arguments.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Run an already parsed command line.
pub fn run_with(cli: Cli) -> Result<()> {
    let config = ScoreboardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config);

    match cli.command {
        Commands::Table { data } => {
            let dataset = load_data(&data, &config)?;
            print!("{}", markdown::dataset_table(&dataset));
            Ok(())
        }
        Commands::View {
            kind,
            models,
            metric,
            pairs,
            format,
            data,
        } => {
            let dataset = load_data(&data, &config)?;
            let selection = selection_from_args(&models, metric, &pairs);
            match compute_view(&dataset, &selection, kind) {
                Ok(chart) => match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
                    OutputFormat::Markdown => {
                        println!("## {}", chart.title);
                        println!();
                        print!("{}", markdown::chart_table(&chart));
                    }
                },
                Err(e) => println!("Insufficient data: {}", e),
            }
            Ok(())
        }
        Commands::Report { output, verbose } => {
            let out_dir = output.unwrap_or_else(|| config.output_dir.clone());
            if verbose {
                println!("Rendering all pages...");
            }

            let results = run_and_write_all(&out_dir)?;
            info!(views = results.len(), out_dir = %out_dir.display(), "Report complete");

            println!("Completed {} views", results.len());
            println!("Results written to {}/", out_dir.display());

            if verbose {
                for result in &results {
                    println!("  - {}: {}", result.view_id, result.status());
                }
            }
            Ok(())
        }
        Commands::Status { detailed } => {
            println!("WMT Score Board");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Default source: {}", config.default_source);

            if detailed {
                println!("\nConfiguration:");
                println!("  - output_dir: {}", config.output_dir.display());
                match &config.data_file {
                    Some(path) => println!("  - data_file: {}", path.display()),
                    None => println!("  - data_file: (built-in catalog)"),
                }
                println!("  - log_level: {}", config.log_level);
                println!("\nOutput files:");
                println!("  - {}/", io::RAW_DIR);
                println!("  - {}", io::ALL_RESULTS_FILE);
                println!("  - {}", io::SUMMARY_FILE);
                println!("  - {}", io::REPORT_FILE);
            }
            Ok(())
        }
    }
}
