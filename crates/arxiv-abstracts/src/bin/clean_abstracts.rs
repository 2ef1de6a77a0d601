//! Abstract cleaner - Entry Point
//!
//! Turns a scraped dataset file into one normalized abstract per line.

use std::path::{Path, PathBuf};

use clap::Parser;

use arxiv_abstracts::telemetry::{LogOptions, init_tracing};
use arxiv_abstracts::{CleaningPipeline, TracingReporter};

#[derive(Parser, Debug)]
#[command(name = "clean-abstracts")]
#[command(about = "Deduplicate, filter and normalize a scraped abstract dataset")]
struct Cli {
    /// Dataset file (JSON array of paper records)
    #[arg(long)]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&LogOptions {
        tool: "abstract_cleaner",
        level: "info",
        json: false,
        log_dir: Some(Path::new("logs")),
    })?;

    tracing::info!(input = %cli.path.display(), "Starting to clean abstracts");

    match CleaningPipeline::new(&TracingReporter).clean(&cli.path) {
        Ok(output) => {
            tracing::info!(output = %output.display(), "Cleaning finished");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Cleaning failed");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_only_path() {
        let cli = Cli::try_parse_from(["clean-abstracts", "--path", "data/d.json"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("data/d.json"));

        assert!(Cli::try_parse_from(["clean-abstracts"]).is_err());
        assert!(Cli::try_parse_from(["clean-abstracts", "--path", "d.json", "--verbose"]).is_err());
    }

    #[test]
    fn test_has_no_version_flag() {
        let err = Cli::try_parse_from(["clean-abstracts", "--version"]).unwrap_err();
        assert_ne!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
