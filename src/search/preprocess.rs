//! Query string preparation for the search service.

use crate::model::namespace::compile_lui_pattern;

const OR_CONNECTOR: &str = " OR ";
const QUOTE: char = '"';

/// Build the disjunctive search string sent to the search service.
///
/// Every colon becomes a space (they separate prefix and id, they are not
/// search content). This is broader than [`id_detection_tokens`], which only
/// splits at the first colon so that prefixed ids stay whole. Double-quoted sections survive as quoted phrases, everything
/// else is split on whitespace, and the pieces are joined with ` OR `.
/// With fewer than two quote characters the query is split on whitespace
/// only.
///
/// ```
/// use idorg_bar::search::preprocess_query_string;
///
/// assert_eq!(preprocess_query_string("\"cell line\" HeLa"), "\"cell line\" OR HeLa");
/// assert_eq!(preprocess_query_string("uniprot:P12345"), "uniprot OR P12345");
/// ```
pub fn preprocess_query_string(query: &str) -> String {
    let query = query.replace(':', " ");
    let sections: Vec<&str> = query.split(QUOTE).collect();

    let elements: Vec<String> = if sections.len() < 3 {
        query.split_whitespace().map(str::to_string).collect()
    } else {
        let mut elements = Vec::new();
        for (idx, section) in sections.iter().enumerate() {
            if idx % 2 == 1 {
                elements.push(format!("{QUOTE}{section}{QUOTE}"));
            } else {
                elements.extend(section.split_whitespace().map(str::to_string));
            }
        }
        elements
    };

    elements
        .iter()
        .map(|element| element.trim())
        .filter(|element| !element.is_empty())
        .collect::<Vec<_>>()
        .join(OR_CONNECTOR)
}

/// Tokens of a query as seen by local id detection.
///
/// Only the first `"` and the first `:` act as separators, besides
/// whitespace. Later colons stay inside their token so ids of namespaces
/// whose pattern embeds the prefix survive: `go:GO:0006915` yields
/// `["go", "GO:0006915"]`.
pub fn id_detection_tokens(query: &str) -> Vec<&str> {
    let first_quote = query.find(QUOTE);
    let first_colon = query.find(':');

    let mut tokens = Vec::new();
    let mut start = 0;
    for (offset, ch) in query.char_indices() {
        let is_separator =
            ch.is_whitespace() || Some(offset) == first_quote || Some(offset) == first_colon;
        if is_separator {
            if offset > start {
                tokens.push(&query[start..offset]);
            }
            start = offset + ch.len_utf8();
        }
    }
    if start < query.len() {
        tokens.push(&query[start..]);
    }
    tokens
}

/// The single token of `tokens` that `lui_pattern` matches.
///
/// Returns `None` when there are fewer than two tokens (a lone token is the
/// prefix or a description, not an id), when the pattern does not compile,
/// or when zero or several tokens match.
pub fn possible_local_id<'a>(tokens: &[&'a str], lui_pattern: &str) -> Option<&'a str> {
    if tokens.len() < 2 {
        return None;
    }

    let regex = compile_lui_pattern("", lui_pattern)?;
    let mut matches = tokens.iter().filter(|token| regex.is_match(token));

    match (matches.next(), matches.next()) {
        (Some(token), None) => Some(*token),
        _ => None,
    }
}
