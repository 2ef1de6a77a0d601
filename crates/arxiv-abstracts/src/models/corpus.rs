//! Corpus: the id-deduplicated result of one retrieval run.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::PaperRecord;
use crate::error::{PipelineError, PipelineResult};

/// Deduplicated paper collection, at most one record per id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<PaperRecord>,
}

impl Corpus {
    /// Deduplicate `records` by id.
    ///
    /// When an id repeats, the record seen last replaces the earlier one but keeps
    /// the earlier one's position.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = PaperRecord>) -> Self {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut deduped: Vec<PaperRecord> = Vec::new();

        for record in records {
            match positions.get(&record.id) {
                Some(&index) => deduped[index] = record,
                None => {
                    positions.insert(record.id.clone(), deduped.len());
                    deduped.push(record);
                }
            }
        }

        Self { records: deduped }
    }

    /// Number of unique papers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus holds no papers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a paper by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PaperRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Iterate over the papers.
    pub fn iter(&self) -> impl Iterator<Item = &PaperRecord> {
        self.records.iter()
    }

    /// File name for a corpus saved at `at`.
    #[must_use]
    pub fn file_name(at: DateTime<Utc>) -> String {
        format!("dataset_{}.json", at.format("%Y-%m-%dT%H-%M-%S%.6fZ"))
    }

    /// Serialize the corpus as a JSON array to a timestamped file in `dir`.
    ///
    /// The file is created with create-new semantics; an existing file is never
    /// overwritten.
    pub fn save(&self, dir: &Path) -> PipelineResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
        let path = dir.join(Self::file_name(Utc::now()));
        self.write_new(&path)?;
        Ok(path)
    }

    /// Serialize the corpus as a JSON array to `path`, which must not exist yet.
    pub fn write_new(&self, path: &Path) -> PipelineResult<()> {
        write_json_new(path, &self.records)
    }
}

/// Create `path` and write `value` to it as JSON.
///
/// A file this call created is removed again if writing it fails.
fn write_json_new<T: Serialize + ?Sized>(path: &Path, value: &T) -> PipelineResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| PipelineError::io(path, e))?;

    let mut writer = BufWriter::new(file);
    let result = serde_json::to_writer(&mut writer, value)
        .map_err(PipelineError::from)
        .and_then(|()| writer.flush().map_err(|e| PipelineError::io(path, e)));

    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(path);
    }
    result
}
