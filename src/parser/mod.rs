//! Compact identifier parser and evaluator.
//!
//! This module provides pure functions for splitting a partially typed query
//! into [`QueryParts`] and classifying it against a pre-fetched candidate
//! list. Nothing here performs I/O.

use crate::model::{NamespaceEntry, QueryParts, ValidityState};

const PREFIX_SEPARATOR: char = ':';
const RESOURCE_SEPARATOR: char = '/';

/// Split a query according to a simplified CURIE grammar.
///
/// - Only the first `:` separates prefix from id; later colons belong to the id.
/// - On the prefix side, a first `/` segment (when more than one segment
///   exists) is the resource; the rest, rejoined with `/`, is the prefix.
///
/// Empty input yields `QueryParts::default()`.
pub fn split_query(query: &str) -> QueryParts {
    if query.is_empty() {
        return QueryParts::default();
    }

    let (prefix_side, id) = match query.split_once(PREFIX_SEPARATOR) {
        Some((prefix_side, id_side)) => (prefix_side, id_side),
        None => (query, ""),
    };

    let (resource, prefix) = match prefix_side.split_once(RESOURCE_SEPARATOR) {
        Some((resource, rest)) => (resource, rest),
        None => ("", prefix_side),
    };

    QueryParts {
        resource: resource.to_string(),
        prefix: prefix.to_string(),
        prefix_effective_value: prefix.to_lowercase(),
        id: id.to_string(),
        id_with_embedded_prefix: format!("{prefix}{PREFIX_SEPARATOR}{id}"),
    }
}

/// Classify a query against the namespaces fetched for it.
///
/// Decision order (first match wins):
/// 1. empty query or any whitespace → `NoCurie` (with empty parts)
/// 2. empty prefix → `NoCurie`
/// 3. no candidate with `prefix == prefix_effective_value` → `InvalidPrefix`
/// 4. empty id → `PrefixWithColon` if the query ends with `:`, else `PrefixOnly`
/// 5. neither `prefix:id` nor `id` matches the namespace pattern → `InvalidLocalId`
/// 6. otherwise → `ValidCurie`
///
/// Never returns `QueryingNamespaces`; that state belongs to whoever is
/// waiting on the fetch.
pub fn evaluate_query(query: &str, namespaces: &[NamespaceEntry]) -> (ValidityState, QueryParts) {
    if query.is_empty() || query.chars().any(char::is_whitespace) {
        return (ValidityState::NoCurie, QueryParts::default());
    }

    let parts = split_query(query);

    if parts.prefix.is_empty() {
        return (ValidityState::NoCurie, parts);
    }

    let Some(current) = find_namespace(namespaces, &parts.prefix_effective_value) else {
        return (ValidityState::InvalidPrefix, parts);
    };

    if parts.id.is_empty() {
        let state = if query.ends_with(PREFIX_SEPARATOR) {
            ValidityState::PrefixWithColon
        } else {
            ValidityState::PrefixOnly
        };
        return (state, parts);
    }

    let matches = current.lui_regex().is_some_and(|regex| {
        regex.is_match(&parts.id_with_embedded_prefix) || regex.is_match(&parts.id)
    });

    if !matches {
        return (ValidityState::InvalidLocalId, parts);
    }

    (ValidityState::ValidCurie, parts)
}

/// First candidate whose registry prefix equals `effective_prefix`.
pub fn find_namespace<'a>(
    namespaces: &'a [NamespaceEntry],
    effective_prefix: &str,
) -> Option<&'a NamespaceEntry> {
    namespaces.iter().find(|ns| ns.prefix == effective_prefix)
}

/// Assemble a CURIE from a resource, a namespace and a local id.
///
/// Adds `resource/` when a resource is given. Namespaces whose pattern
/// embeds the prefix take the prefix spelling from the pattern (`^GO:\d{7}$`
/// gives `GO`), since those are allowed to carry capitals.
pub fn complete_query(resource: Option<&str>, namespace: &NamespaceEntry, id: &str) -> String {
    let prefix = if namespace.embeds_prefix_in_lui() {
        prefix_from_pattern(&namespace.lui_pattern).unwrap_or_else(|| namespace.prefix.clone())
    } else {
        namespace.prefix.clone()
    };

    match resource {
        Some(resource) if !resource.is_empty() => {
            format!("{resource}{RESOURCE_SEPARATOR}{prefix}{PREFIX_SEPARATOR}{id}")
        }
        _ => format!("{prefix}{PREFIX_SEPARATOR}{id}"),
    }
}

/// Prefix spelling embedded at the start of a pattern, e.g. `^(GO):...`.
fn prefix_from_pattern(pattern: &str) -> Option<String> {
    let mut chars = pattern.chars();
    chars.next()?;
    let head = chars.as_str().split(PREFIX_SEPARATOR).next()?;
    let prefix: String = head
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '/' | '\\'))
        .collect();
    if prefix.is_empty() {
        None
    } else {
        Some(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniprot() -> NamespaceEntry {
        NamespaceEntry::new("uniprot", "UniProt Knowledgebase", "^[A-Z0-9]{6,10}$", "P0DP23")
    }

    fn go() -> NamespaceEntry {
        NamespaceEntry::new("go", "Gene Ontology", r"^GO:\d{7}$", "0006915")
    }

    // ===== split_query Tests =====

    #[test]
    fn split_query_with_resource_prefix_and_id() {
        let parts = split_query("foo/bar:baz");
        assert_eq!(
            parts,
            QueryParts {
                resource: "foo".to_string(),
                prefix: "bar".to_string(),
                prefix_effective_value: "bar".to_string(),
                id: "baz".to_string(),
                id_with_embedded_prefix: "bar:baz".to_string(),
            }
        );
    }

    #[test]
    fn split_query_without_resource() {
        let parts = split_query("uniprot:P12345");
        assert_eq!(parts.resource, "");
        assert_eq!(parts.prefix, "uniprot");
        assert_eq!(parts.id, "P12345");
        assert_eq!(parts.prefix_effective_value, "uniprot");
        assert_eq!(parts.id_with_embedded_prefix, "uniprot:P12345");
    }

    #[test]
    fn split_query_empty_input_is_all_empty() {
        assert_eq!(split_query(""), QueryParts::default());
    }

    #[test]
    fn split_query_keeps_later_colons_in_id() {
        let parts = split_query("go:GO:0006915");
        assert_eq!(parts.prefix, "go");
        assert_eq!(parts.id, "GO:0006915");
        assert_eq!(parts.id_with_embedded_prefix, "go:GO:0006915");
    }

    #[test]
    fn split_query_rejoins_extra_slash_segments_into_prefix() {
        let parts = split_query("a/b/c:1");
        assert_eq!(parts.resource, "a");
        assert_eq!(parts.prefix, "b/c");
    }

    #[test]
    fn split_query_lowercases_effective_prefix() {
        let parts = split_query("UniProt:P12345");
        assert_eq!(parts.prefix, "UniProt");
        assert_eq!(parts.prefix_effective_value, "uniprot");
    }

    #[test]
    fn split_query_without_colon_has_empty_id() {
        let parts = split_query("taxonomy");
        assert_eq!(parts.id, "");
        assert_eq!(parts.id_with_embedded_prefix, "taxonomy:");
    }

    #[test]
    fn split_query_slash_after_colon_belongs_to_id() {
        let parts = split_query("doi:10.1000/182");
        assert_eq!(parts.resource, "");
        assert_eq!(parts.prefix, "doi");
        assert_eq!(parts.id, "10.1000/182");
    }

    // ===== evaluate_query Tests =====

    #[test]
    fn evaluate_valid_curie() {
        let (state, parts) = evaluate_query("uniprot:P12345", &[uniprot()]);
        assert_eq!(state, ValidityState::ValidCurie);
        assert_eq!(parts.id, "P12345");
    }

    #[test]
    fn evaluate_prefix_with_colon() {
        let (state, _) = evaluate_query("uniprot:", &[uniprot()]);
        assert_eq!(state, ValidityState::PrefixWithColon);
    }

    #[test]
    fn evaluate_prefix_only() {
        let (state, _) = evaluate_query("uniprot", &[uniprot()]);
        assert_eq!(state, ValidityState::PrefixOnly);
    }

    #[test]
    fn evaluate_invalid_local_id() {
        let (state, _) = evaluate_query("uniprot:###", &[uniprot()]);
        assert_eq!(state, ValidityState::InvalidLocalId);
    }

    #[test]
    fn evaluate_unknown_prefix_with_no_candidates() {
        let (state, parts) = evaluate_query("unknownpfx:123", &[]);
        assert_eq!(state, ValidityState::InvalidPrefix);
        assert_eq!(parts.prefix_effective_value, "unknownpfx");
    }

    #[test]
    fn evaluate_empty_query_is_no_curie() {
        let (state, parts) = evaluate_query("", &[uniprot()]);
        assert_eq!(state, ValidityState::NoCurie);
        assert_eq!(parts, QueryParts::default());
    }

    #[test]
    fn evaluate_multi_token_query_is_no_curie() {
        let (state, parts) = evaluate_query("protein sequences", &[uniprot()]);
        assert_eq!(state, ValidityState::NoCurie);
        assert_eq!(parts, QueryParts::default());
    }

    #[test]
    fn evaluate_leading_colon_has_empty_prefix() {
        let (state, parts) = evaluate_query(":P12345", &[uniprot()]);
        assert_eq!(state, ValidityState::NoCurie);
        assert_eq!(parts.id, "P12345");
    }

    #[test]
    fn evaluate_matches_prefix_case_insensitively() {
        let (state, _) = evaluate_query("UNIPROT:P12345", &[uniprot()]);
        assert_eq!(state, ValidityState::ValidCurie);
    }

    #[test]
    fn evaluate_embedded_prefix_namespace_matches_combined_form() {
        let (state, _) = evaluate_query("GO:0006915", &[go()]);
        assert_eq!(state, ValidityState::ValidCurie);
    }

    #[test]
    fn evaluate_embedded_prefix_namespace_also_matches_full_id() {
        let (state, _) = evaluate_query("go:GO:0006915", &[go()]);
        assert_eq!(state, ValidityState::ValidCurie);
    }

    #[test]
    fn evaluate_malformed_pattern_reports_invalid_local_id() {
        let broken = NamespaceEntry::new("broken", "Broken", "^[0-9", "1");
        let (state, _) = evaluate_query("broken:1", &[broken]);
        assert_eq!(state, ValidityState::InvalidLocalId);
    }

    #[test]
    fn evaluate_unknown_prefix_wins_over_empty_id() {
        let (state, _) = evaluate_query("pdb:", &[uniprot()]);
        assert_eq!(state, ValidityState::InvalidPrefix);
    }

    #[test]
    fn evaluate_uses_first_matching_candidate() {
        let first = NamespaceEntry::new("dup", "First", "^a$", "a");
        let second = NamespaceEntry::new("dup", "Second", "^b$", "b");
        let (state, _) = evaluate_query("dup:b", &[first, second]);
        assert_eq!(state, ValidityState::InvalidLocalId);
    }

    // ===== complete_query Tests =====

    #[test]
    fn complete_query_plain_prefix() {
        assert_eq!(complete_query(None, &uniprot(), "P12345"), "uniprot:P12345");
    }

    #[test]
    fn complete_query_adds_resource() {
        assert_eq!(
            complete_query(Some("ebi"), &uniprot(), "P12345"),
            "ebi/uniprot:P12345"
        );
    }

    #[test]
    fn complete_query_empty_resource_is_ignored() {
        assert_eq!(complete_query(Some(""), &uniprot(), ""), "uniprot:");
    }

    #[test]
    fn complete_query_takes_prefix_from_embedded_pattern() {
        assert_eq!(complete_query(None, &go(), "0006915"), "GO:0006915");
    }

    #[test]
    fn complete_query_strips_group_characters_from_pattern_prefix() {
        let chebi = NamespaceEntry::new("chebi", "ChEBI", r"^(CHEBI:)?\d+$", "36927");
        assert_eq!(complete_query(None, &chebi, "36927"), "CHEBI:36927");
    }
}
