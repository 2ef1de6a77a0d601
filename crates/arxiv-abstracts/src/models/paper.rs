//! Paper record as persisted in the dataset file.

use serde::{Deserialize, Serialize};

/// One retrieved paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Stable identifier assigned by the index (the arXiv abs URL).
    pub id: String,

    /// Taxonomy code the paper was primarily filed under.
    pub primary_category: String,

    /// Paper title.
    pub title: String,

    /// Author names in listed order.
    pub authors: Vec<String>,

    /// Publication time in seconds since the Unix epoch.
    pub published: f64,

    /// Raw abstract text, possibly containing LaTeX, URLs and escape artifacts.
    pub r#abstract: String,

    /// Link to the PDF rendition.
    pub pdf_url: String,
}
