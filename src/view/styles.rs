//! Severity styling.
//!
//! Maps a validity [`Severity`] to the icon and colour used by the helper
//! panel and the search box border.

use crate::model::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Icon shown in front of the helper message.
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✔",
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
        Severity::Danger => "✖",
    }
}

/// Foreground colour for a severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

/// Bold style in the severity colour.
pub fn severity_style(severity: Severity) -> Style {
    Style::default()
        .fg(severity_color(severity))
        .add_modifier(Modifier::BOLD)
}

/// Style of the selected suggestion row.
pub fn selected_row_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Style of de-emphasised text (labels, sample ids, hints).
pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_severity_has_distinct_icon_and_color() {
        let all = [
            Severity::Success,
            Severity::Info,
            Severity::Warning,
            Severity::Danger,
        ];
        let icons: std::collections::HashSet<_> = all.iter().map(|s| severity_icon(*s)).collect();
        let colors: std::collections::HashSet<_> =
            all.iter().map(|s| format!("{:?}", severity_color(*s))).collect();

        assert_eq!(icons.len(), 4);
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn danger_is_red() {
        assert_eq!(severity_style(Severity::Danger).fg, Some(Color::Red));
    }
}
