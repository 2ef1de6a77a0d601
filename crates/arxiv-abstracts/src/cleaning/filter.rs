//! Dataset filtering: duplicate abstracts and withdrawn papers.
//!
//! Both passes only remove records; survivors keep their relative order.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::PaperRecord;

static WITHDRAWN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(paper has been withdrawn)|(withdrawn due to)")
        .expect("valid withdrawal regex")
});

/// Drop records whose abstract is byte-identical to an earlier record's.
#[must_use]
pub fn drop_duplicate_abstracts(records: Vec<PaperRecord>) -> Vec<PaperRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records.into_iter().filter(|r| seen.insert(r.r#abstract.clone())).collect()
}

/// Whether a raw abstract announces that the paper was withdrawn.
#[must_use]
pub fn is_withdrawn(text: &str) -> bool {
    WITHDRAWN.is_match(text)
}

/// Drop records whose raw abstract carries a withdrawal notice.
#[must_use]
pub fn drop_withdrawn(records: Vec<PaperRecord>) -> Vec<PaperRecord> {
    records.into_iter().filter(|r| !is_withdrawn(&r.r#abstract)).collect()
}
