//! Parsed pieces of a (possibly partial) compact identifier.

/// The parts of a query split on its `/` and `:` delimiters.
///
/// Derived data: recomputed from the query text on every change, never
/// persisted. Absent parts are empty strings, so `QueryParts::default()` is
/// the result for an empty query.
///
/// Invariants (upheld by [`crate::parser::split_query`]):
/// - `prefix_effective_value == prefix.to_lowercase()`
/// - `id_with_embedded_prefix == format!("{prefix}:{id}")` for non-empty queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParts {
    /// Optional provider segment before the first `/` (`resource/prefix:id`).
    pub resource: String,
    /// Namespace prefix as typed.
    pub prefix: String,
    /// Lowercased prefix, the value compared against registry prefixes.
    pub prefix_effective_value: String,
    /// Local identifier (everything after the first `:`).
    pub id: String,
    /// `prefix:id`, for namespaces whose pattern includes the prefix.
    pub id_with_embedded_prefix: String,
}

impl QueryParts {
    /// The resource segment, if any.
    pub fn resource(&self) -> Option<&str> {
        if self.resource.is_empty() {
            None
        } else {
            Some(&self.resource)
        }
    }
}
