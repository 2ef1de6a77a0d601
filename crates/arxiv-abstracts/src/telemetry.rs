//! Tracing setup shared by the binaries.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Where and how to emit the run's status trace.
#[derive(Debug, Clone)]
pub struct LogOptions<'a> {
    /// Tool name, used as the log file prefix.
    pub tool: &'a str,
    /// Default filter when `RUST_LOG` is unset.
    pub level: &'a str,
    /// Emit JSON lines instead of the compact format.
    pub json: bool,
    /// Directory for a per-run log file; stderr only when `None`.
    pub log_dir: Option<&'a Path>,
}

/// Per-run log file name, e.g. `abstract_scraper_2024-03-01T12-30-45Z.log`.
#[must_use]
pub fn log_file_name(tool: &str) -> String {
    format!("{}_{}.log", tool, Utc::now().format("%Y-%m-%dT%H-%M-%SZ"))
}

/// Install the global subscriber. Returns the log file path when one was opened.
///
/// # Errors
///
/// Returns error if the log directory or file cannot be created.
pub fn init_tracing(options: &LogOptions<'_>) -> anyhow::Result<Option<PathBuf>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.level));

    let stderr_layer = if options.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, log_path) = match options.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = dir.join(log_file_name(options.tool));
            let file = File::create(&path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed();
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(filter).with(stderr_layer).with(file_layer).init();

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let name = log_file_name("abstract_cleaner");
        assert!(name.starts_with("abstract_cleaner_"));
        assert!(name.ends_with("Z.log"));
        assert!(!name.contains(':'));
    }
}
