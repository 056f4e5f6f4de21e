//! Screen layout.
//!
//! Pure layout logic: splits the frame into examples line, search box,
//! helper panel, suggestion list and status bar, then renders each widget
//! from the current state.

use crate::state::{SearchInputController, EXAMPLE_CURIES};
use crate::view::constants::{
    EXAMPLES_HEIGHT, HELPER_PANEL_HEIGHT, SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT,
};
use crate::view::helper::HelperPanel;
use crate::view::search_bar::SearchBar;
use crate::view::styles::muted_style;
use crate::view::suggestion_list::SuggestionList;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints shown when there is no status message.
const KEY_HINTS: &str = "↑/↓ select · PgUp/PgDn page · Enter apply/resolve · Esc close · Tab example · Ctrl+U clear · Ctrl+C quit";

/// Everything the screen shows besides the search box state.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// Base of resolvable URIs.
    pub identifiers_url: &'a str,
    /// Registry web site.
    pub registry_url: &'a str,
    /// Status bar text; key hints when `None`.
    pub status: Option<&'a str>,
}

/// Areas of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Example CURIEs.
    pub examples: Rect,
    /// Search box.
    pub search: Rect,
    /// Helper panel.
    pub helper: Rect,
    /// Suggestion list (zero height when suggestions are closed).
    pub suggestions: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split `area` into the screen regions.
pub fn calculate_areas(area: Rect, suggestions_open: bool) -> ScreenAreas {
    let (suggestions, filler) = if suggestions_open {
        (Constraint::Min(0), Constraint::Length(0))
    } else {
        (Constraint::Length(0), Constraint::Min(0))
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(EXAMPLES_HEIGHT),
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Length(HELPER_PANEL_HEIGHT),
            suggestions,
            filler,
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        examples: chunks[0],
        search: chunks[1],
        helper: chunks[2],
        suggestions: chunks[3],
        status: chunks[5],
    }
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, input: &SearchInputController, screen: Screen<'_>) {
    let suggestions = input.suggestions();
    let areas = calculate_areas(frame.area(), suggestions.is_some());

    render_examples(frame, areas.examples);
    frame.render_widget(SearchBar::new(input), areas.search);
    frame.render_widget(
        HelperPanel::new(
            input.validity(),
            input.parts(),
            input.candidates(),
            screen.identifiers_url,
        ),
        areas.helper,
    );

    if let Some(suggestions) = suggestions {
        frame.render_widget(
            SuggestionList::new(
                suggestions.candidates(),
                suggestions.selected(),
                suggestions.is_loading(),
                screen.registry_url,
            ),
            areas.suggestions,
        );
    }

    let status = Paragraph::new(Line::from(Span::styled(
        screen.status.unwrap_or(KEY_HINTS),
        Style::default().fg(Color::Black).bg(Color::Gray),
    )));
    frame.render_widget(status, areas.status);
}

fn render_examples(frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled("Examples: ", muted_style())];
    for (index, example) in EXAMPLE_CURIES.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(", ", muted_style()));
        }
        spans.push(Span::raw(*example));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
