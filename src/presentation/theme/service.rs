use super::adapter::ColorConverter;
use crate::domain::entities::ThemePreference;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const LIGHT_BACKGROUND: Color = Color::Rgb(250, 246, 240);
const LIGHT_FOREGROUND: Color = Color::Rgb(40, 36, 32);
const DARK_BACKGROUND: Color = Color::Rgb(24, 24, 28);
const DARK_FOREGROUND: Color = Color::Rgb(226, 224, 220);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub preference: ThemePreference,
    pub accent: Color,
    pub base_style: Style,
    pub dimmed_style: Style,
    pub selection_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub favorite_style: Style,
    pub tag_style: Style,
    pub error_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemePreference::default(), "Orange")
    }
}

impl Theme {
    pub fn new(preference: ThemePreference, accent_color_str: &str) -> Self {
        Self::from_color(preference, parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(preference: ThemePreference, accent: Color) -> Self {
        let (background, foreground) = if preference.is_dark() {
            (DARK_BACKGROUND, DARK_FOREGROUND)
        } else {
            (LIGHT_BACKGROUND, LIGHT_FOREGROUND)
        };

        let selection_bg = if preference.is_dark() {
            ColorConverter::shade(accent, Some(0.3), 0.2)
        } else {
            ColorConverter::shade(accent, Some(0.6), 0.85)
        };
        let tag_fg = ColorConverter::shade(accent, None, if preference.is_dark() { 0.7 } else { 0.35 });

        let base_style = Style::default().bg(background).fg(foreground);

        Self {
            preference,
            accent,
            base_style,
            dimmed_style: base_style.fg(Color::DarkGray),
            selection_style: Style::default().bg(selection_bg).fg(foreground),
            border_style: base_style.fg(Color::Gray),
            focused_border_style: base_style.fg(accent),
            favorite_style: base_style.fg(Color::Red).add_modifier(Modifier::BOLD),
            tag_style: base_style.fg(tag_fg),
            error_style: base_style.fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Icon for the theme switch: a sun while dark, a moon while light.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        if self.preference.is_dark() {
            "☀"
        } else {
            "☾"
        }
    }
}

/// Parses a color name or `#rgb`/`#rrggbb` code, falling back to orange.
#[must_use]
pub fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    Color::Indexed(208)
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => Some((
            channel(&s[0..1].repeat(2))?,
            channel(&s[1..2].repeat(2))?,
            channel(&s[2..3].repeat(2))?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Red", Color::Red ; "named")]
    #[test_case("blue", Color::Blue ; "lowercase name")]
    #[test_case("#FF0000", Color::Rgb(255, 0, 0) ; "long hex")]
    #[test_case("#0f0", Color::Rgb(0, 255, 0) ; "short hex")]
    #[test_case("Orange", Color::Indexed(208) ; "orange")]
    #[test_case("Invalid", Color::Indexed(208) ; "fallback")]
    fn test_parse_color(input: &str, expected: Color) {
        assert_eq!(parse_color(input), expected);
    }

    #[test]
    fn test_icon_follows_preference() {
        assert_eq!(Theme::new(ThemePreference::Dark, "Orange").icon(), "☀");
        assert_eq!(Theme::new(ThemePreference::Light, "Orange").icon(), "☾");
    }

    #[test]
    fn test_palettes_differ() {
        let light = Theme::new(ThemePreference::Light, "Orange");
        let dark = Theme::new(ThemePreference::Dark, "Orange");

        assert_eq!(light.base_style.bg, Some(LIGHT_BACKGROUND));
        assert_eq!(dark.base_style.bg, Some(DARK_BACKGROUND));
        assert_ne!(light.selection_style, dark.selection_style);
    }
}
