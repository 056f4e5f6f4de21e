//! Namespace search.
//!
//! This module turns a raw query into a registry lookup:
//! - [`preprocess_query_string`] builds the disjunctive search string
//! - [`EbiSearchClient`] performs the HTTP request and flattens the response
//! - [`rescore`] boosts namespaces whose id pattern matches a query token

pub mod client;
pub mod preprocess;
pub mod rescore;

pub use client::EbiSearchClient;
pub use preprocess::{id_detection_tokens, possible_local_id, preprocess_query_string};
pub use rescore::rescore;

use crate::model::NamespaceEntry;
use std::time::Duration;
use url::Url;

/// Source of namespace candidates for a query.
///
/// Implementations are infallible from the caller's point of view: any
/// failure is reported as an empty list, which the evaluator then classifies
/// like any other query without candidates.
pub trait NamespaceSearch: Send + Sync {
    /// Fetch at most `page_size` candidates for the raw `query`.
    fn fetch(&self, query: &str, page_size: usize) -> Vec<NamespaceEntry>;
}

/// Settings for the remote namespace search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Base URL of the EBI search domain endpoint.
    pub endpoint: Url,
    /// Number of hits requested from the service.
    pub response_size: usize,
    /// Whether to boost namespaces whose pattern matches a single query token.
    pub rescore_single_id: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}
