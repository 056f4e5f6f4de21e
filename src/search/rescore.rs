//! Score boosting for namespaces whose id pattern matches the query.

use crate::model::NamespaceEntry;
use crate::search::preprocess::{id_detection_tokens, possible_local_id};

/// Boost candidates that look like they own a token of the query.
///
/// Every candidate whose `lui_pattern` matches exactly one query token gets
/// the maximum score of the list added to its own. The result is sorted by
/// descending score; the sort is stable, so equal scores keep their service
/// order. The input is consumed and a new ordering is returned.
pub fn rescore(namespaces: Vec<NamespaceEntry>, query: &str) -> Vec<NamespaceEntry> {
    if query.is_empty() || namespaces.is_empty() {
        return namespaces;
    }

    let tokens = id_detection_tokens(query);
    let max_score = namespaces
        .iter()
        .map(|ns| ns.score)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut rescored: Vec<NamespaceEntry> = namespaces
        .into_iter()
        .map(|mut ns| {
            if possible_local_id(&tokens, &ns.lui_pattern).is_some() {
                ns.score += max_score;
            }
            ns
        })
        .collect();

    rescored.sort_by(|a, b| b.score.total_cmp(&a.score));
    rescored
}
