//! Namespace candidates returned by the registry search.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A registered namespace as returned by the search service.
///
/// Candidate lists are replaced wholesale on every successful fetch; entries
/// are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    /// Registry prefix (always lowercase in the registry).
    pub prefix: String,
    /// Human readable namespace name.
    pub name: String,
    /// Regular expression that valid local ids must match.
    pub lui_pattern: String,
    /// An example local id.
    pub sample_id: String,
    /// Relevance score from the search service (possibly boosted).
    pub score: f64,
}

impl NamespaceEntry {
    /// Create an entry with a zero score.
    pub fn new(
        prefix: impl Into<String>,
        name: impl Into<String>,
        lui_pattern: impl Into<String>,
        sample_id: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            lui_pattern: lui_pattern.into(),
            sample_id: sample_id.into(),
            score: 0.0,
        }
    }

    /// Builder-style score setter.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Compile the local id pattern.
    ///
    /// Returns `None` (and logs a warning) when the registry ships a pattern
    /// the `regex` crate cannot compile. Callers treat such a namespace as
    /// matching nothing.
    pub fn lui_regex(&self) -> Option<Regex> {
        compile_lui_pattern(&self.prefix, &self.lui_pattern)
    }

    /// True when the local id pattern literally contains `prefix:`.
    ///
    /// These namespaces (e.g. `GO:0006915`) expect the prefix as part of the
    /// local id and fix its capitalisation.
    pub fn embeds_prefix_in_lui(&self) -> bool {
        if self.prefix.is_empty() {
            return false;
        }
        let needle = format!("{}:", self.prefix.to_lowercase());
        self.lui_pattern.to_lowercase().contains(&needle)
    }
}

/// Compile a local id pattern, logging instead of failing on bad syntax.
pub(crate) fn compile_lui_pattern(prefix: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(prefix, pattern, error = %err, "Ignoring malformed lui_pattern");
            None
        }
    }
}
