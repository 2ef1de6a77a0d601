//! arXiv abstract corpus
//!
//! Builds a deduplicated, cleaned text corpus of arXiv abstracts in two
//! independent stages connected by a JSON dataset file.
//!
//! # Stages
//!
//! - **Scrape**: walk a category taxonomy, page through the arXiv query API for
//!   every leaf category, deduplicate by paper id and save a timestamped
//!   `dataset_*.json`.
//! - **Clean**: load a dataset, drop duplicate abstracts and withdrawn papers,
//!   normalize LaTeX, escapes, whitespace and URLs, and write one abstract per
//!   line to `<stem>-cleaned.txt`.
//!
//! # Example
//!
//! ```no_run
//! use arxiv_abstracts::{ArxivClient, Config, CorpusBuilder, Taxonomy, TracingReporter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ArxivClient::new(Config::from_env()?)?;
//!     let taxonomy = Taxonomy::new([("Statistics", vec!["stat.ML"])]);
//!
//!     let path = CorpusBuilder::new(&client, &TracingReporter)
//!         .build_and_save(&taxonomy, "data".as_ref())
//!         .await?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod cleaning;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod taxonomy;
pub mod telemetry;

pub use builder::CorpusBuilder;
pub use cleaning::CleaningPipeline;
pub use client::{ArxivClient, PaperSource};
pub use config::Config;
pub use error::{ClientError, PipelineError};
pub use models::{Corpus, PaperRecord};
pub use progress::{MemoryReporter, ProgressEvent, ProgressReporter, TracingReporter};
pub use taxonomy::Taxonomy;
