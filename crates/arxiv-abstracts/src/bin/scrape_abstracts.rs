//! Corpus scraper - Entry Point
//!
//! Walks the category taxonomy, retrieves every leaf category from arXiv and
//! saves the deduplicated corpus as a timestamped JSON dataset.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use arxiv_abstracts::telemetry::{LogOptions, init_tracing};
use arxiv_abstracts::{ArxivClient, Config, CorpusBuilder, Taxonomy, TracingReporter};

#[derive(Parser, Debug)]
#[command(name = "scrape-abstracts")]
#[command(about = "Retrieve arXiv abstracts for every category of a taxonomy")]
#[command(version)]
struct Cli {
    /// Directory the dataset file is written to
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// TOML taxonomy to traverse instead of the built-in one
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Directory for the per-run log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let log_path = init_tracing(&LogOptions {
        tool: "abstract_scraper",
        level: &cli.log_level,
        json: cli.json_logs,
        log_dir: Some(cli.log_dir.as_path()),
    })?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = ?log_path,
        "Starting to scrape arxiv.org"
    );

    let taxonomy = match &cli.taxonomy {
        Some(path) => Taxonomy::load(path)
            .with_context(|| format!("loading taxonomy from {}", path.display()))?,
        None => Taxonomy::builtin()?,
    };

    let config = Config::from_env()?;
    tracing::info!(
        categories = taxonomy.categories().len(),
        leaves = taxonomy.leaf_count(),
        page_size = config.page_size,
        max_results = config.max_results,
        page_delay = ?config.page_delay,
        "Taxonomy loaded"
    );

    let client = ArxivClient::new(config)?;
    let started = Instant::now();

    let result = CorpusBuilder::new(&client, &TracingReporter)
        .build_and_save(&taxonomy, &cli.output_dir)
        .await;

    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), elapsed = ?started.elapsed(), "Scrape finished");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, elapsed = ?started.elapsed(), "Scrape failed");
            Err(err.into())
        }
    }
}
