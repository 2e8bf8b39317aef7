//! Shared message line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Error => Color::Red,
        }
    }
}

/// Status bar widget.
///
/// The left side holds the shared message area, the right side a short
/// summary of what is on screen.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    right: String,
    level: StatusLevel,
    base: Style,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
            base: Style::default(),
        }
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the background style.
    #[must_use]
    pub const fn base_style(mut self, style: Style) -> Self {
        self.base = style;
        self
    }

    /// Creates error status bar.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new().left(message).level(StatusLevel::Error)
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self
            .base
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let width = area.width as usize;
        let left_len = self.left.width();
        let right_len = self.right.width();

        let mut spans = vec![Span::styled(format!(" {}", self.left), style)];

        let padding = width.saturating_sub(left_len + 1 + right_len + 1);
        if !self.right.is_empty() && padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), self.base));
            spans.push(Span::styled(format!("{} ", self.right), self.base));
        }

        Paragraph::new(Line::from(spans))
            .style(self.base)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_error_message_left_summary_right() {
        let bar = StatusBar::error("No foxes found for that tag.").right("6 foxes");
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        let text = row(&buf);
        assert!(text.starts_with(" No foxes found for that tag."));
        assert!(text.ends_with("6 foxes "));
        assert_eq!(buf[(1, 0)].fg, Color::Red);
    }

    #[test]
    fn test_summary_dropped_when_too_narrow() {
        let bar = StatusBar::error("Failed to load fox images.").right("6 foxes");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        assert!(!row(&buf).contains("foxes "));
    }
}
