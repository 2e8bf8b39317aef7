use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    #[default]
    Gallery,
    Favorites,
    Search,
    TagInput,
    Preview,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gallery => "FOXES",
            Self::Favorites => "FAVORITES",
            Self::Search => "SEARCH",
            Self::TagInput => "TAG",
            Self::Preview => "PREVIEW",
        }
    }

    /// Fixed hints for contexts that do not use the gallery keymap.
    #[must_use]
    pub const fn input_hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Search => &[("Search", "Enter"), ("Cancel", "Esc")],
            Self::TagInput => &[("Add tag", "Enter"), ("Cancel", "Esc")],
            Self::Preview => &[("Close", "Esc")],
            Self::Gallery | Self::Favorites => &[],
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let key_bg = ColorConverter::shade(theme.accent, Some(0.5), 0.08);

        Self {
            background: theme.base_style,
            label_style: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(key_bg).fg(Color::White),
            info: theme.dimmed_style,
            focus_indicator: Style::default()
                .bg(key_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct FooterBar<'a> {
    keybindings: Vec<&'a Keybind>,
    focus_context: FocusContext,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: impl IntoIterator<Item = &'a Keybind>) -> Self {
        Self {
            keybindings: keybindings.into_iter().collect(),
            focus_context: FocusContext::default(),
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = context;
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    fn hints(&self) -> Vec<(String, String)> {
        let fixed = self.focus_context.input_hints();
        if fixed.is_empty() {
            self.keybindings
                .iter()
                .map(|b| (b.label.to_string(), b.key_label()))
                .collect()
        } else {
            fixed
                .iter()
                .map(|(label, key)| ((*label).to_string(), (*key).to_string()))
                .collect()
        }
    }

    fn build_left_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.focus_context.display_name()),
                self.style.focus_indicator,
            ),
            Span::raw(" "),
        ];

        for (i, (label, key)) in self.hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(format!(" {label} "), self.style.label_style));
            spans.push(Span::styled(format!(" {key} "), self.style.key_style));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.chars().count()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::styled(info, self.style.info)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::Keymap;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_gallery_hints_come_from_keymap() {
        let keymap = Keymap::default();
        let area = Rect::new(0, 0, 200, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(keymap.visible()).render(area, &mut buf);

        let text = row(&buf);
        assert!(text.starts_with(" FOXES "));
        assert!(text.contains(" Favorite  f "));
        assert!(text.contains(" Preview  Enter "));
        assert!(!text.contains("Up"));
    }

    #[test]
    fn test_input_context_uses_fixed_hints() {
        let keymap = Keymap::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        FooterBar::new(keymap.visible())
            .focus_context(FocusContext::TagInput)
            .right_info(Some("3 tagged"))
            .render(area, &mut buf);

        let text = row(&buf);
        assert!(text.contains(" Add tag  Enter "));
        assert!(!text.contains("Favorite"));
        assert!(text.ends_with("3 tagged"));
    }
}
