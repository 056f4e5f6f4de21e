//! Search box widget.

use crate::state::SearchInputController;
use crate::view::styles::severity_color;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Search box with a block cursor.
///
/// When the query is wider than the box, the text scrolls so the cursor
/// stays visible.
pub struct SearchBar<'a> {
    input: &'a SearchInputController,
}

impl<'a> SearchBar<'a> {
    /// Create new SearchBar widget.
    pub fn new(input: &'a SearchInputController) -> Self {
        Self { input }
    }

    fn title(&self) -> &'static str {
        if self.input.is_submittable() {
            "Search · Enter to resolve"
        } else {
            "Search"
        }
    }
}

/// Drop leading characters until `before` plus the cursor cell fits `width`.
fn visible_tail(before: &str, width: usize) -> &str {
    let mut start = 0;
    for (offset, _) in before.char_indices() {
        if before[offset..].width() < width {
            start = offset;
            break;
        }
        start = before.len();
    }
    &before[start..]
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let query = self.input.query();
        let cursor = self.input.cursor();

        let before: String = query.chars().take(cursor).collect();
        let mut after = query.chars().skip(cursor);
        let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
        let after_text: String = after.collect();

        let inner_width = usize::from(area.width.saturating_sub(2));
        let before = visible_tail(&before, inner_width).to_string();

        let spans = vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(after_text),
        ];

        let border_color = severity_color(self.input.validity().severity());
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.title())
                .border_style(Style::default().fg(border_color)),
        );

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SuggestionSettings;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::{Duration, Instant};

    fn settings() -> SuggestionSettings {
        SuggestionSettings {
            debounce: Duration::from_millis(600),
            page_size: 25,
        }
    }

    fn render(input: &SearchInputController, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchBar::new(input), frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn renders_query_and_title() {
        let input = SearchInputController::new(settings(), "uniprot:P12345", Instant::now());
        let text = render(&input, 40);

        assert!(text.contains("Search"));
        assert!(text.contains("uniprot:P12345"));
        assert!(!text.contains("Enter to resolve"));
    }

    #[test]
    fn long_query_scrolls_to_keep_cursor_visible() {
        let query = "a".repeat(30) + "TAIL";
        let input = SearchInputController::new(settings(), query, Instant::now());
        let text = render(&input, 20);

        assert!(text.contains("TAIL"));
    }

    #[test]
    fn visible_tail_keeps_room_for_cursor() {
        assert_eq!(visible_tail("abcdef", 4), "def");
        assert_eq!(visible_tail("ab", 10), "ab");
        assert_eq!(visible_tail("", 3), "");
    }
}
