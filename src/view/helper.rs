//! Helper panel: explains the validity state and shows the parsed parts.

use crate::model::{NamespaceEntry, QueryParts, ValidityState};
use crate::parser::find_namespace;
use crate::view::styles::{muted_style, severity_icon, severity_style};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Guidance text for a validity state.
pub fn helper_message(
    validity: ValidityState,
    parts: &QueryParts,
    candidates: &[NamespaceEntry],
) -> String {
    match validity {
        ValidityState::ValidCurie => "Your compact identifier appears to be valid. \
             Make sure the URI takes you where you expect it to."
            .to_string(),
        ValidityState::NoCurie => "Type a compact identifier as [prefix]:[id], or describe a \
             repository or data type and pick a suggestion."
            .to_string(),
        ValidityState::QueryingNamespaces => "Looking up matching namespaces...".to_string(),
        ValidityState::InvalidPrefix => {
            let mut message = format!(
                "Your compact identifier appears to be incorrect. The prefix {} does not exist in the registry.",
                parts.prefix_effective_value
            );
            if !candidates.is_empty() {
                message.push_str(" Try one of the suggestions below.");
            }
            message
        }
        ValidityState::PrefixOnly => "You have a valid prefix, but your compact identifier is \
             incomplete. Please add a colon and object ID."
            .to_string(),
        ValidityState::PrefixWithColon => {
            "You are just missing the object ID to finish the compact identifier.".to_string()
        }
        ValidityState::InvalidLocalId => {
            let pattern = find_namespace(candidates, &parts.prefix_effective_value)
                .map(|ns| ns.lui_pattern.as_str())
                .unwrap_or_default();
            format!(
                "Your compact identifier appears to be incorrect: the local id {} does not match the pattern {}.",
                parts.id, pattern
            )
        }
    }
}

/// Resolvable URI for a valid CURIE, `None` otherwise.
///
/// ```
/// use idorg_bar::model::ValidityState;
/// use idorg_bar::parser::split_query;
/// use idorg_bar::view::resolvable_uri;
///
/// let parts = split_query("pdb:2gc4");
/// assert_eq!(
///     resolvable_uri("http://identifiers.org", ValidityState::ValidCurie, &parts),
///     Some("http://identifiers.org/pdb:2gc4".to_string())
/// );
/// assert_eq!(resolvable_uri("http://identifiers.org", ValidityState::PrefixOnly, &parts), None);
/// ```
pub fn resolvable_uri(
    identifiers_url: &str,
    validity: ValidityState,
    parts: &QueryParts,
) -> Option<String> {
    if validity != ValidityState::ValidCurie || parts.prefix.is_empty() || parts.id.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}:{}",
        identifiers_url.trim_end_matches('/'),
        parts.prefix,
        parts.id
    ))
}

fn part_row<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), muted_style()),
        Span::raw(value),
    ])
}

/// Helper panel widget.
pub struct HelperPanel<'a> {
    validity: ValidityState,
    parts: &'a QueryParts,
    candidates: &'a [NamespaceEntry],
    identifiers_url: &'a str,
}

impl<'a> HelperPanel<'a> {
    /// Create new HelperPanel widget.
    pub fn new(
        validity: ValidityState,
        parts: &'a QueryParts,
        candidates: &'a [NamespaceEntry],
        identifiers_url: &'a str,
    ) -> Self {
        Self {
            validity,
            parts,
            candidates,
            identifiers_url,
        }
    }
}

impl Widget for HelperPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let severity = self.validity.severity();
        let message = helper_message(self.validity, self.parts, self.candidates);

        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{} ", severity_icon(severity)), severity_style(severity)),
            Span::raw(message),
        ])];

        if let Some(resource) = self.parts.resource() {
            lines.push(part_row("Resource:", resource));
        }
        lines.push(part_row("Prefix:", or_empty(&self.parts.prefix)));
        lines.push(part_row("Local id:", or_empty(&self.parts.id)));

        let uri = resolvable_uri(self.identifiers_url, self.validity, self.parts);
        if let Some(uri) = uri.as_deref() {
            lines.push(part_row("URI:", uri));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(self.validity.as_str()))
            .render(area, buf);
    }
}

fn or_empty(value: &str) -> &str {
    if value.is_empty() {
        "empty"
    } else {
        value
    }
}
