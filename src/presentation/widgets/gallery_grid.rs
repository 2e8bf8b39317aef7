//! Card grid for the main gallery and the favorites pane.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::{FavoritesList, ImageRecord, TagMap};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::TextInput;

/// Text shown when a pane has nothing to display.
pub const EMPTY_GALLERY_MESSAGE: &str = "No foxes found.";

const CARD_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 6;

/// Which pane a collection is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Main,
    Favorites,
}

impl RenderTarget {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Main => "Foxes",
            Self::Favorites => "Favorites",
        }
    }
}

/// Display data for one image card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub record: ImageRecord,
    pub favorited: bool,
    pub tags: Vec<String>,
}

/// Structural view of a pane, rebuilt wholesale on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    Placeholder(&'static str),
    Cards(Vec<CardView>),
}

impl Default for GalleryView {
    fn default() -> Self {
        Self::Placeholder(EMPTY_GALLERY_MESSAGE)
    }
}

impl GalleryView {
    /// Builds one card per image, in input order.
    #[must_use]
    pub fn build(images: &[ImageRecord], favorites: &FavoritesList, tags: &TagMap) -> Self {
        if images.is_empty() {
            return Self::Placeholder(EMPTY_GALLERY_MESSAGE);
        }

        Self::Cards(
            images
                .iter()
                .map(|record| CardView {
                    favorited: favorites.contains(record),
                    tags: tags.tags_for(record.image()).to_vec(),
                    record: record.clone(),
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Cards(cards) => cards,
        }
    }
}

/// A rendered pane with its selection.
#[derive(Debug, Clone)]
pub struct GalleryPane {
    target: RenderTarget,
    view: GalleryView,
    selected: usize,
    scroll_row: usize,
    columns: usize,
    focused: bool,
}

impl GalleryPane {
    #[must_use]
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            view: GalleryView::default(),
            selected: 0,
            scroll_row: 0,
            columns: 1,
            focused: false,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub const fn view(&self) -> &GalleryView {
        &self.view
    }

    /// Replaces every card with a fresh view of `images`.
    ///
    /// The selection index is kept when still in range.
    pub fn render(&mut self, images: &[ImageRecord], favorites: &FavoritesList, tags: &TagMap) {
        self.view = GalleryView::build(images, favorites, tags);
        let len = self.view.cards().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        if len == 0 {
            self.scroll_row = 0;
        }
    }

    /// Updates the tag list of every card showing `image`.
    pub fn refresh_tags(&mut self, image: &str, tags: &[String]) {
        if let GalleryView::Cards(cards) = &mut self.view {
            for card in cards.iter_mut().filter(|c| c.record.image() == image) {
                card.tags = tags.to_vec();
            }
        }
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<&ImageRecord> {
        self.view.cards().get(self.selected).map(|c| &c.record)
    }

    #[cfg(test)]
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.cards().is_empty()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn select_next(&mut self) {
        let len = self.view.cards().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves one row down, using the column count of the last draw.
    pub fn select_below(&mut self) {
        let len = self.view.cards().len();
        if self.selected + self.columns < len {
            self.selected += self.columns;
        } else if len > 0 && self.selected / self.columns < (len - 1) / self.columns {
            self.selected = len - 1;
        }
    }

    pub fn select_above(&mut self) {
        if self.selected >= self.columns {
            self.selected -= self.columns;
        }
    }

    fn ensure_visible(&mut self, visible_rows: usize) {
        let row = self.selected / self.columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if visible_rows > 0 && row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }
}

/// Draws a [`GalleryPane`].
pub struct GalleryGrid<'a> {
    theme: &'a Theme,
    tag_input: Option<&'a TextInput>,
}

impl<'a> GalleryGrid<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            tag_input: None,
        }
    }

    /// Shows `input` inside the selected card.
    #[must_use]
    pub const fn tag_input(mut self, input: Option<&'a TextInput>) -> Self {
        self.tag_input = input;
        self
    }

    fn card_lines(&self, card: &CardView, selected: bool, width: usize) -> Vec<Line<'static>> {
        let theme = self.theme;
        let (marker, marker_style) = if card.favorited {
            ("♥ ", theme.favorite_style)
        } else {
            ("♡ ", theme.dimmed_style)
        };

        let name_style = theme.base_style.add_modifier(Modifier::BOLD);
        let title = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(
                truncate(card.record.file_name(), width.saturating_sub(2)),
                name_style,
            ),
        ]);

        let link = Line::styled(truncate(card.record.link(), width), theme.dimmed_style);

        let tags = if card.tags.is_empty() {
            Line::styled("no tags", theme.dimmed_style)
        } else {
            Line::styled(truncate(&card.tags.join(", "), width), theme.tag_style)
        };

        let footer = match self.tag_input.filter(|_| selected) {
            Some(input) => Line::from(vec![
                Span::styled("tag › ", theme.tag_style),
                Span::styled(
                    truncate(input.value(), width.saturating_sub(7)),
                    theme.base_style,
                ),
                Span::styled("▏", theme.focused_border_style),
            ]),
            None => Line::default(),
        };

        vec![title, link, tags, footer]
    }
}

impl GalleryGrid<'_> {
    /// One line per card, for panes too short to hold a full card.
    fn render_compact(
        &self,
        cards: &[CardView],
        inner: Rect,
        buf: &mut Buffer,
        state: &mut GalleryPane,
    ) {
        let theme = self.theme;
        state.columns = 1;
        state.ensure_visible(usize::from(inner.height));
        let width = usize::from(inner.width);

        let visible = cards
            .iter()
            .enumerate()
            .skip(state.scroll_row)
            .take(usize::from(inner.height));
        for (row, (index, card)) in (inner.y..).zip(visible) {
            let selected = index == state.selected;
            let (marker, marker_style) = if card.favorited {
                ("♥ ", theme.favorite_style)
            } else {
                ("♡ ", theme.dimmed_style)
            };

            let mut spans = vec![Span::styled(marker, marker_style)];
            match self.tag_input.filter(|_| selected) {
                Some(input) => {
                    spans.push(Span::styled("tag › ", theme.tag_style));
                    spans.push(Span::styled(
                        truncate(input.value(), width.saturating_sub(9)),
                        theme.base_style,
                    ));
                    spans.push(Span::styled("▏", theme.focused_border_style));
                }
                None => {
                    let name = truncate(card.record.file_name(), width.saturating_sub(2));
                    let rest = width.saturating_sub(name.width() + 4);
                    spans.push(Span::styled(
                        name,
                        theme.base_style.add_modifier(Modifier::BOLD),
                    ));
                    if !card.tags.is_empty() && rest > 0 {
                        spans.push(Span::raw("  "));
                        spans.push(Span::styled(
                            truncate(&card.tags.join(", "), rest),
                            theme.tag_style,
                        ));
                    }
                }
            }

            let style = if selected && state.focused {
                theme.selection_style
            } else {
                theme.base_style
            };
            Paragraph::new(Line::from(spans))
                .style(style)
                .render(Rect::new(inner.x, row, inner.width, 1), buf);
        }
    }
}

impl StatefulWidget for GalleryGrid<'_> {
    type State = GalleryPane;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let theme = self.theme;
        let border_style = if state.focused {
            theme.focused_border_style
        } else {
            theme.border_style
        };

        let title = match state.target {
            RenderTarget::Main => format!(" {} ", state.target.title()),
            RenderTarget::Favorites => {
                format!(" {} ({}) ", state.target.title(), state.view.cards().len())
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(theme.base_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let cards = match &state.view {
            GalleryView::Placeholder(text) => {
                let y = inner.y + inner.height / 2;
                Paragraph::new(*text)
                    .style(theme.dimmed_style)
                    .alignment(Alignment::Center)
                    .render(Rect::new(inner.x, y, inner.width, 1), buf);
                return;
            }
            GalleryView::Cards(cards) => cards.clone(),
        };

        if inner.height < CARD_HEIGHT {
            self.render_compact(&cards, inner, buf, state);
            return;
        }

        state.columns = usize::from((inner.width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        state.ensure_visible(visible_rows);

        let card_width = inner.width / u16::try_from(state.columns).unwrap_or(1);
        let skip = state.scroll_row * state.columns;

        for (offset, card) in cards.iter().enumerate().skip(skip) {
            let index = offset - skip;
            let row = u16::try_from(index / state.columns).unwrap_or(u16::MAX);
            let col = u16::try_from(index % state.columns).unwrap_or(u16::MAX);

            let y = inner.y.saturating_add(row.saturating_mul(CARD_HEIGHT));
            if y.saturating_add(CARD_HEIGHT) > inner.bottom() {
                break;
            }
            let card_area = Rect::new(inner.x + col * card_width, y, card_width, CARD_HEIGHT);

            let selected = offset == state.selected;
            let card_style = if selected && state.focused {
                theme.selection_style
            } else {
                theme.base_style
            };
            let card_block = Block::default()
                .borders(Borders::ALL)
                .border_style(if selected {
                    theme.focused_border_style
                } else {
                    theme.border_style
                })
                .style(card_style);
            let card_inner = card_block.inner(card_area);
            card_block.render(card_area, buf);

            let lines = self.card_lines(card, selected, usize::from(card_inner.width));
            Paragraph::new(lines).render(card_inner, buf);
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            out.pop();
            out.push('…');
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}
