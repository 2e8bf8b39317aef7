use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub version: Style,
    pub loading: Style,
    pub theme_icon: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let version_bg = ColorConverter::shade(theme.accent, Some(0.5), 0.08);

        Self {
            background: theme.base_style,
            app_name: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            version: Style::default().bg(version_bg).fg(Color::White),
            loading: theme.base_style.fg(theme.accent).add_modifier(Modifier::BOLD),
            theme_icon: theme.base_style.add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    loading: bool,
    tick: usize,
    theme_icon: &'a str,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            loading: false,
            tick: 0,
            theme_icon: "",
            style: HeaderBarStyle::default(),
        }
    }

    /// Shows the loading indicator, animated by `tick`.
    #[must_use]
    pub const fn loading(mut self, loading: bool, tick: usize) -> Self {
        self.loading = loading;
        self.tick = tick;
        self
    }

    #[must_use]
    pub const fn theme_icon(mut self, icon: &'a str) -> Self {
        self.theme_icon = icon;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn right_text(&self) -> String {
        let mut text = String::new();
        if self.loading {
            text.push_str(SPINNER[self.tick % SPINNER.len()]);
            text.push_str(" Loading foxes…  ");
        }
        text.push_str(self.theme_icon);
        text.push(' ');
        text
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let app_name = format!(" {} ", self.app_name.to_uppercase());
        let version = format!(" v{} ", self.version);
        let left_width =
            u16::try_from(app_name.width() + 1 + version.width()).unwrap_or(area.width);

        let left_line = Line::from(vec![
            Span::styled(app_name, self.style.app_name),
            Span::raw(" "),
            Span::styled(version, self.style.version),
        ]);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let right = self.right_text();
        let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);
        if right_width < area.width.saturating_sub(left_width) {
            let style = if self.loading {
                self.style.loading
            } else {
                self.style.theme_icon
            };
            let right_area = Rect::new(
                area.right().saturating_sub(right_width),
                area.y,
                right_width,
                1,
            );
            Paragraph::new(Line::styled(right, style)).render(right_area, buf);
        }
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
    fn test_right_text() {
        let idle = HeaderBar::new("foxgallery", "0.1.0").theme_icon("☾");
        assert_eq!(idle.right_text(), "☾ ");

        let busy = HeaderBar::new("foxgallery", "0.1.0")
            .theme_icon("☀")
            .loading(true, 1);
        assert_eq!(busy.right_text(), "◓ Loading foxes…  ☀ ");
    }

    #[test]
    fn test_renders_name_and_icon() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        HeaderBar::new("foxgallery", "0.1.0")
            .theme_icon("☾")
            .render(area, &mut buf);

        let text = row(&buf);
        assert!(text.starts_with(" FOXGALLERY   v0.1.0 "));
        assert!(text.trim_end().ends_with('☾'));
    }
}
