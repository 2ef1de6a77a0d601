//! Status reporting for the pipelines.
//!
//! Components receive a [`ProgressReporter`] explicitly instead of writing to a
//! global sink, so tests can observe exactly what a run reported.

use std::path::PathBuf;
use std::sync::Mutex;

/// A notable step in a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A pipeline run began.
    RunStarted {
        /// Pipeline name.
        pipeline: &'static str,
    },
    /// Retrieval of one leaf category began.
    CategoryStarted {
        /// Top-level taxonomy entry.
        category: String,
        /// Leaf code being queried.
        subcategory: String,
    },
    /// Retrieval of one leaf category finished.
    CategoryFinished {
        /// Top-level taxonomy entry.
        category: String,
        /// Leaf code that was queried.
        subcategory: String,
        /// Records returned for it.
        records: usize,
    },
    /// All leaves were visited and the collection was deduplicated.
    Deduplicated {
        /// Records before deduplication.
        retrieved: usize,
        /// Unique records kept.
        unique: usize,
    },
    /// A pipeline stage began.
    StageStarted {
        /// Stage name.
        stage: &'static str,
    },
    /// A stage removed records.
    Filtered {
        /// Stage name.
        stage: &'static str,
        /// Records removed by it.
        removed: usize,
    },
    /// Output was written.
    Saved {
        /// Output path.
        path: PathBuf,
        /// Items written.
        items: usize,
    },
}

/// Receives progress events from pipeline components.
pub trait ProgressReporter {
    /// Record one event.
    fn report(&self, event: ProgressEvent);
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::RunStarted { pipeline } => {
                tracing::info!(pipeline, "Starting run");
            }
            ProgressEvent::CategoryStarted { category, subcategory } => {
                tracing::info!(%category, %subcategory, "Scraping category");
            }
            ProgressEvent::CategoryFinished { category, subcategory, records } => {
                tracing::info!(%category, %subcategory, records, "Category retrieved");
            }
            ProgressEvent::Deduplicated { retrieved, unique } => {
                tracing::info!(retrieved, unique, "{} abstracts retrieved", unique);
            }
            ProgressEvent::StageStarted { stage } => {
                tracing::info!(stage, "Stage started");
            }
            ProgressEvent::Filtered { stage, removed } => {
                tracing::info!(stage, removed, "Records removed");
            }
            ProgressEvent::Saved { path, items } => {
                tracing::info!(path = %path.display(), items, "Saved output");
            }
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MemoryReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Names of the stages started so far, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::StageStarted { stage } => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for MemoryReporter {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &R {
    fn report(&self, event: ProgressEvent) {
        (**self).report(event);
    }
}
