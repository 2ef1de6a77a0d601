//! Category taxonomy traversed by the corpus builder.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};

/// Taxonomy shipped with the crate.
const DEFAULT_TAXONOMY: &str = include_str!("../taxonomy.toml");

/// One top-level category and its leaf subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Human-readable name.
    pub name: String,

    /// Leaf codes queried against the index, in traversal order.
    #[serde(default)]
    pub subcategories: Vec<String>,
}

/// Ordered mapping of category to subcategory codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Taxonomy {
    #[serde(rename = "category", default)]
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Build a taxonomy from `(name, subcategories)` pairs, keeping their order.
    #[must_use]
    pub fn new<N, S>(entries: impl IntoIterator<Item = (N, Vec<S>)>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        let categories = entries
            .into_iter()
            .map(|(name, subs)| Category {
                name: name.into(),
                subcategories: subs.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Parse a TOML taxonomy document.
    pub fn from_toml(document: &str) -> PipelineResult<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Load a TOML taxonomy from a file.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let document = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_toml(&document)
    }

    /// The taxonomy shipped with the crate.
    pub fn builtin() -> PipelineResult<Self> {
        Self::from_toml(DEFAULT_TAXONOMY)
    }

    /// Top-level categories in order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Depth-first `(category, subcategory)` pairs, in listed order.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|c| {
            c.subcategories.iter().map(move |s| (c.name.as_str(), s.as_str()))
        })
    }

    /// Number of leaf subcategories.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.categories.iter().map(|c| c.subcategories.len()).sum()
    }
}
