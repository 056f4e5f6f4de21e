//! Suggestion list widget.

use crate::model::NamespaceEntry;
use crate::view::styles::{muted_style, selected_row_style};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Registry page of a namespace.
pub fn registry_link(registry_url: &str, prefix: &str) -> String {
    format!("{}/registry/{}", registry_url.trim_end_matches('/'), prefix)
}

/// First row to draw so that `selected` is inside a window of `rows` lines.
pub fn scroll_offset(selected: Option<usize>, rows: usize) -> usize {
    match selected {
        Some(index) if rows > 0 && index >= rows => index + 1 - rows,
        _ => 0,
    }
}

/// Candidate list with the selected row highlighted.
pub struct SuggestionList<'a> {
    candidates: &'a [NamespaceEntry],
    selected: Option<usize>,
    loading: bool,
    registry_url: &'a str,
}

impl<'a> SuggestionList<'a> {
    /// Create new SuggestionList widget.
    pub fn new(
        candidates: &'a [NamespaceEntry],
        selected: Option<usize>,
        loading: bool,
        registry_url: &'a str,
    ) -> Self {
        Self {
            candidates,
            selected,
            loading,
            registry_url,
        }
    }

    fn row(&self, index: usize, entry: &'a NamespaceEntry) -> Line<'a> {
        let is_selected = self.selected == Some(index);
        let badge_style = if is_selected {
            Style::default().bg(Color::Gray).fg(Color::Black)
        } else {
            Style::default().bg(Color::Black).fg(Color::Gray)
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", entry.prefix), badge_style),
            Span::raw(" "),
            Span::styled(entry.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  sample: {}", entry.sample_id), muted_style()),
        ]);

        if is_selected {
            line.style(selected_row_style())
        } else {
            line
        }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL).title("Suggestions");
        if let Some(entry) = self.selected.and_then(|i| self.candidates.get(i)) {
            block = block.title_bottom(registry_link(self.registry_url, &entry.prefix));
        }

        let lines: Vec<Line> = if self.loading {
            vec![Line::from(Span::styled("Loading...", muted_style()))]
        } else if self.candidates.is_empty() {
            vec![Line::from(Span::styled("No suggestions", muted_style()))]
        } else {
            let rows = usize::from(area.height.saturating_sub(2));
            let offset = scroll_offset(self.selected, rows);
            self.candidates
                .iter()
                .enumerate()
                .skip(offset)
                .take(rows.max(1))
                .map(|(index, entry)| self.row(index, entry))
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
