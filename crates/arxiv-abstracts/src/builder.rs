//! Corpus builder: walks the taxonomy and accumulates every leaf's records.

use std::path::{Path, PathBuf};

use futures::TryStreamExt;

use crate::client::PaperSource;
use crate::error::PipelineResult;
use crate::models::{Corpus, PaperRecord};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::taxonomy::Taxonomy;

/// Retrieves a whole taxonomy through a [`PaperSource`].
pub struct CorpusBuilder<'a, S: ?Sized, R: ?Sized> {
    source: &'a S,
    reporter: &'a R,
}

impl<'a, S, R> CorpusBuilder<'a, S, R>
where
    S: PaperSource + ?Sized,
    R: ProgressReporter + ?Sized,
{
    /// Create a builder drawing records from `source`.
    #[must_use]
    pub const fn new(source: &'a S, reporter: &'a R) -> Self {
        Self { source, reporter }
    }

    /// Retrieve every leaf of `taxonomy`, depth first, and deduplicate by id.
    ///
    /// Any retrieval error aborts the whole build; no partial corpus is returned.
    pub async fn build(&self, taxonomy: &Taxonomy) -> PipelineResult<Corpus> {
        self.reporter.report(ProgressEvent::RunStarted { pipeline: "scrape" });

        let mut dataset: Vec<PaperRecord> = Vec::new();

        for (category, subcategory) in taxonomy.leaves() {
            self.reporter.report(ProgressEvent::CategoryStarted {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            });

            let papers: Vec<PaperRecord> =
                self.source.retrieve(subcategory).try_collect().await?;

            self.reporter.report(ProgressEvent::CategoryFinished {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                records: papers.len(),
            });
            dataset.extend(papers);
        }

        self.reporter.report(ProgressEvent::StageStarted { stage: "deduplicate" });
        let retrieved = dataset.len();
        let corpus = Corpus::from_records(dataset);
        self.reporter.report(ProgressEvent::Deduplicated { retrieved, unique: corpus.len() });

        Ok(corpus)
    }

    /// Build the corpus and save it to a timestamped file in `output_dir`.
    pub async fn build_and_save(
        &self,
        taxonomy: &Taxonomy,
        output_dir: &Path,
    ) -> PipelineResult<PathBuf> {
        let corpus = self.build(taxonomy).await?;

        self.reporter.report(ProgressEvent::StageStarted { stage: "save" });
        let path = corpus.save(output_dir)?;
        self.reporter.report(ProgressEvent::Saved { path: path.clone(), items: corpus.len() });

        Ok(path)
    }
}
