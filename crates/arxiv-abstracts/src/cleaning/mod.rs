//! Cleaning pipeline: dataset file in, one normalized abstract per line out.
//!
//! Stages run in a fixed order: load, drop duplicate abstracts, drop withdrawn
//! papers, normalize, save. Output is fully computed before anything is written,
//! and lands through a rename so a failed run never leaves a partial file.

pub mod filter;
pub mod normalize;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::models::PaperRecord;
use crate::progress::{ProgressEvent, ProgressReporter};

pub use filter::{drop_duplicate_abstracts, drop_withdrawn, is_withdrawn};
pub use normalize::normalize;

/// Suffix appended to the input file stem for the cleaned output.
pub const OUTPUT_SUFFIX: &str = "-cleaned";

/// Runs the cleaning stages over one dataset file.
pub struct CleaningPipeline<'a, R: ?Sized> {
    reporter: &'a R,
}

impl<'a, R: ProgressReporter + ?Sized> CleaningPipeline<'a, R> {
    /// Create a pipeline reporting to `reporter`.
    #[must_use]
    pub const fn new(reporter: &'a R) -> Self {
        Self { reporter }
    }

    /// Clean `input` and write the result next to it, returning the output path.
    pub fn clean(&self, input: &Path) -> PipelineResult<PathBuf> {
        self.reporter.report(ProgressEvent::RunStarted { pipeline: "clean" });
        let output = cleaned_output_path(input)?;

        self.reporter.report(ProgressEvent::StageStarted { stage: "load" });
        let records = load_dataset(input)?;

        let cleaned = self.clean_records(records);

        self.reporter.report(ProgressEvent::StageStarted { stage: "save" });
        save_lines(&cleaned, &output)?;
        self.reporter.report(ProgressEvent::Saved { path: output.clone(), items: cleaned.len() });

        Ok(output)
    }

    /// Filter and normalize records already in memory.
    #[must_use]
    pub fn clean_records(&self, records: Vec<PaperRecord>) -> Vec<String> {
        self.reporter.report(ProgressEvent::StageStarted { stage: "drop_duplicates" });
        let before = records.len();
        let records = drop_duplicate_abstracts(records);
        self.reporter.report(ProgressEvent::Filtered {
            stage: "drop_duplicates",
            removed: before - records.len(),
        });

        self.reporter.report(ProgressEvent::StageStarted { stage: "drop_withdrawn" });
        let before = records.len();
        let records = drop_withdrawn(records);
        self.reporter.report(ProgressEvent::Filtered {
            stage: "drop_withdrawn",
            removed: before - records.len(),
        });

        self.reporter.report(ProgressEvent::StageStarted { stage: "normalize" });
        records.iter().map(|r| normalize(&r.r#abstract)).collect()
    }
}

/// `<dir>/<stem>-cleaned.txt` for an input at `<dir>/<stem>.<ext>`.
pub fn cleaned_output_path(input: &Path) -> PipelineResult<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PipelineError::InvalidPath(input.to_path_buf()))?;

    Ok(input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.txt")))
}

/// Read a dataset file: a JSON array of paper records.
pub fn load_dataset(path: &Path) -> PipelineResult<Vec<PaperRecord>> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| PipelineError::Dataset { path: path.to_path_buf(), source })
}

/// Write one line per entry to `path`, replacing it atomically.
pub fn save_lines(lines: &[String], path: &Path) -> PipelineResult<()> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    let staging = PathBuf::from(staging);

    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&staging)?);
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    };

    if let Err(e) = write() {
        let _ = fs::remove_file(&staging);
        return Err(PipelineError::io(&staging, e));
    }

    fs::rename(&staging, path).map_err(|e| PipelineError::io(path, e))
}
