use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Color,
    widgets::{Block, StatefulWidget, Widget},
};
use ratatui_image::picker::Picker;
use tracing::debug;

use crate::application::GalleryState;
use crate::domain::entities::{FavoritesList, ImageRecord, TagMap, ThemePreference};
use crate::domain::keybinding::{Action, Keymap};
use crate::infrastructure::image::PreviewLoadedEvent;
use crate::presentation::events::EventHandler;
use crate::presentation::theme::{Theme, parse_color};
use crate::presentation::widgets::{
    FocusContext, FooterBar, FooterBarStyle, GalleryGrid, GalleryPane, HeaderBar, HeaderBarStyle,
    ImageModal, ImageModalView, RenderTarget, StatusBar, TextInput,
};
use crate::{NAME, VERSION};

const MAIN_PANE_WIDTH_PERCENT: u16 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryFocus {
    Main,
    Favorites,
    Search,
    TagInput,
}

impl GalleryFocus {
    #[must_use]
    pub const fn to_focus_context(self) -> FocusContext {
        match self {
            Self::Main => FocusContext::Gallery,
            Self::Favorites => FocusContext::Favorites,
            Self::Search => FocusContext::Search,
            Self::TagInput => FocusContext::TagInput,
        }
    }
}

/// What the main pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MainContent {
    Batch(usize),
    SearchResults { query: String, count: usize },
}

/// Requests produced by a key press for the application to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryKeyResult {
    Consumed,
    Quit,
    LoadMore,
    Search(String),
    ToggleFavorite(ImageRecord),
    AddTag { record: ImageRecord, tag: String },
    ToggleTheme,
    LoadPreview(String),
    OpenLink(String),
    ClearMessage,
}

pub struct GalleryScreenState {
    focus: GalleryFocus,
    keymap: Keymap,
    accent: Color,
    theme: Theme,
    main_pane: GalleryPane,
    favorites_pane: GalleryPane,
    main_content: MainContent,
    search_input: TextInput,
    tag_input: TextInput,
    tag_target: Option<ImageRecord>,
    modal: ImageModal,
    tick: usize,
}

impl GalleryScreenState {
    #[must_use]
    pub fn new(
        keymap: Keymap,
        accent_color: &str,
        preference: ThemePreference,
        picker: Option<Picker>,
    ) -> Self {
        let accent = parse_color(accent_color);
        let mut main_pane = GalleryPane::new(RenderTarget::Main);
        main_pane.set_focused(true);

        Self {
            focus: GalleryFocus::Main,
            keymap,
            accent,
            theme: Theme::from_color(preference, accent),
            main_pane,
            favorites_pane: GalleryPane::new(RenderTarget::Favorites),
            main_content: MainContent::Batch(0),
            search_input: TextInput::new(" Search tags ").placeholder("Press / to search by tag"),
            tag_input: TextInput::new(" Tag "),
            tag_target: None,
            modal: ImageModal::new(picker),
            tick: 0,
        }
    }

    #[must_use]
    pub const fn focus(&self) -> GalleryFocus {
        self.focus
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn main_pane(&self) -> &GalleryPane {
        &self.main_pane
    }

    #[must_use]
    pub const fn favorites_pane(&self) -> &GalleryPane {
        &self.favorites_pane
    }

    #[must_use]
    pub const fn modal(&self) -> &ImageModal {
        &self.modal
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Renders the working gallery into the main pane.
    pub fn show_batch(
        &mut self,
        images: &[ImageRecord],
        favorites: &FavoritesList,
        tags: &TagMap,
    ) {
        self.main_pane.render(images, favorites, tags);
        self.main_content = MainContent::Batch(images.len());
        self.drop_stale_tag_target();
    }

    /// Renders search results into the main pane.
    pub fn show_search_results(
        &mut self,
        query: &str,
        results: &[ImageRecord],
        favorites: &FavoritesList,
        tags: &TagMap,
    ) {
        self.main_pane.render(results, favorites, tags);
        self.main_content = MainContent::SearchResults {
            query: query.to_string(),
            count: results.len(),
        };
        self.drop_stale_tag_target();
    }

    pub fn show_favorites(&mut self, favorites: &FavoritesList, tags: &TagMap) {
        self.favorites_pane.render(favorites.as_slice(), favorites, tags);
        self.drop_stale_tag_target();
    }

    /// Cancels tag entry once its card is no longer the selected one.
    fn drop_stale_tag_target(&mut self) {
        let Some(target) = &self.tag_target else {
            return;
        };
        let origin = self.tag_origin();
        let pane = match origin {
            GalleryFocus::Favorites => &self.favorites_pane,
            _ => &self.main_pane,
        };
        if pane.selected_record().is_some_and(|r| r.same_image(target)) {
            return;
        }

        debug!(image = target.image(), "Tagged card replaced, cancelling tag input");
        self.tag_input.clear();
        self.tag_target = None;
        self.set_focus(origin);
    }

    /// Updates the tag display of `image` in both panes.
    pub fn refresh_tags(&mut self, image: &str, tags: &[String]) {
        self.main_pane.refresh_tags(image, tags);
        self.favorites_pane.refresh_tags(image, tags);
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.theme = Theme::from_color(preference, self.accent);
    }

    pub fn apply_preview(&mut self, event: PreviewLoadedEvent) -> bool {
        self.modal.apply(event)
    }

    fn summary(&self) -> String {
        match &self.main_content {
            MainContent::Batch(0) => String::new(),
            MainContent::Batch(1) => "1 fox".to_string(),
            MainContent::Batch(n) => format!("{n} foxes"),
            MainContent::SearchResults { query, count } => {
                format!("{count} tagged '{query}'")
            }
        }
    }

    fn set_focus(&mut self, focus: GalleryFocus) {
        self.focus = focus;
        self.main_pane.set_focused(focus == GalleryFocus::Main);
        self.favorites_pane
            .set_focused(focus == GalleryFocus::Favorites);
        self.search_input.set_focused(focus == GalleryFocus::Search);
        self.tag_input.set_focused(focus == GalleryFocus::TagInput);
    }

    /// The pane card actions apply to.
    fn active_pane(&mut self) -> &mut GalleryPane {
        match self.focus {
            GalleryFocus::Favorites => &mut self.favorites_pane,
            _ => &mut self.main_pane,
        }
    }

    fn selected_record(&mut self) -> Option<ImageRecord> {
        self.active_pane().selected_record().cloned()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_force_quit_event(&key) {
            return GalleryKeyResult::Quit;
        }

        if self.modal.is_open() {
            if EventHandler::is_close_overlay_event(&key) {
                self.modal.close();
            }
            return GalleryKeyResult::Consumed;
        }

        match self.focus {
            GalleryFocus::Search => self.handle_search_key(&key),
            GalleryFocus::TagInput => self.handle_tag_key(&key),
            GalleryFocus::Main | GalleryFocus::Favorites => self.handle_pane_key(&key),
        }
    }

    fn handle_search_key(&mut self, key: &KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_submit_event(key) {
            self.set_focus(GalleryFocus::Main);
            return GalleryKeyResult::Search(self.search_input.value().to_string());
        }
        if EventHandler::is_cancel_event(key) {
            self.set_focus(GalleryFocus::Main);
            return GalleryKeyResult::Consumed;
        }
        self.search_input.handle_key(key);
        GalleryKeyResult::Consumed
    }

    fn handle_tag_key(&mut self, key: &KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_submit_event(key) {
            let tag = self.tag_input.take();
            let origin = self.tag_origin();
            self.set_focus(origin);
            return match self.tag_target.take() {
                Some(record) => GalleryKeyResult::AddTag { record, tag },
                None => GalleryKeyResult::Consumed,
            };
        }
        if EventHandler::is_cancel_event(key) {
            self.tag_input.clear();
            self.tag_target = None;
            let origin = self.tag_origin();
            self.set_focus(origin);
            return GalleryKeyResult::Consumed;
        }
        self.tag_input.handle_key(key);
        GalleryKeyResult::Consumed
    }

    fn tag_origin(&self) -> GalleryFocus {
        if self.favorites_pane.is_focused() {
            GalleryFocus::Favorites
        } else {
            GalleryFocus::Main
        }
    }

    fn handle_pane_key(&mut self, key: &KeyEvent) -> GalleryKeyResult {
        let Some(action) = self.keymap.resolve(key) else {
            return GalleryKeyResult::Consumed;
        };

        match action {
            Action::Quit => GalleryKeyResult::Quit,
            Action::ClearMessage => GalleryKeyResult::ClearMessage,
            Action::LoadMore => GalleryKeyResult::LoadMore,
            Action::ToggleTheme => GalleryKeyResult::ToggleTheme,
            Action::FocusSearch => {
                self.set_focus(GalleryFocus::Search);
                GalleryKeyResult::Consumed
            }
            Action::FocusNextPane => {
                let next = match self.focus {
                    GalleryFocus::Main => GalleryFocus::Favorites,
                    _ => GalleryFocus::Main,
                };
                self.set_focus(next);
                GalleryKeyResult::Consumed
            }
            Action::NavigateUp => {
                self.active_pane().select_above();
                GalleryKeyResult::Consumed
            }
            Action::NavigateDown => {
                self.active_pane().select_below();
                GalleryKeyResult::Consumed
            }
            Action::NavigateLeft => {
                self.active_pane().select_previous();
                GalleryKeyResult::Consumed
            }
            Action::NavigateRight => {
                self.active_pane().select_next();
                GalleryKeyResult::Consumed
            }
            Action::ToggleFavorite => self
                .selected_record()
                .map_or(GalleryKeyResult::Consumed, GalleryKeyResult::ToggleFavorite),
            Action::AddTag => {
                if let Some(record) = self.selected_record() {
                    self.tag_target = Some(record);
                    self.tag_input.clear();
                    // Keep the pane highlighted so the input renders in its card.
                    let pane_focus = self.focus;
                    self.set_focus(GalleryFocus::TagInput);
                    self.favorites_pane
                        .set_focused(pane_focus == GalleryFocus::Favorites);
                    self.main_pane.set_focused(pane_focus == GalleryFocus::Main);
                }
                GalleryKeyResult::Consumed
            }
            Action::PreviewImage => {
                let Some(record) = self.selected_record() else {
                    return GalleryKeyResult::Consumed;
                };
                if self.modal.open(record.image()) {
                    GalleryKeyResult::LoadPreview(record.image().to_string())
                } else {
                    GalleryKeyResult::Consumed
                }
            }
            Action::OpenLink => self
                .selected_record()
                .map_or(GalleryKeyResult::Consumed, |record| {
                    GalleryKeyResult::OpenLink(record.link().to_string())
                }),
        }
    }
}

/// Whole-frame gallery layout.
pub struct GalleryScreen<'a> {
    gallery: &'a GalleryState,
}

impl<'a> GalleryScreen<'a> {
    #[must_use]
    pub const fn new(gallery: &'a GalleryState) -> Self {
        Self { gallery }
    }
}

impl StatefulWidget for GalleryScreen<'_> {
    type State = GalleryScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Block::default().style(state.theme.base_style).render(area, buf);

        let main_layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
        let [header_area, search_area, content_area, status_area, footer_area] =
            main_layout.areas(area);

        render_header_bar(self.gallery, state, header_area, buf);
        state
            .search_input
            .render_themed(search_area, buf, &state.theme);
        render_content_area(state, content_area, buf);
        render_status_bar(self.gallery, state, status_area, buf);
        render_footer_bar(self.gallery, state, footer_area, buf);

        let theme = state.theme;
        StatefulWidget::render(ImageModalView::new(&theme), area, buf, &mut state.modal);
    }
}

fn render_header_bar(
    gallery: &GalleryState,
    state: &GalleryScreenState,
    area: Rect,
    buf: &mut Buffer,
) {
    let header = HeaderBar::new(NAME, VERSION)
        .loading(gallery.loading, state.tick)
        .theme_icon(state.theme.icon())
        .style(HeaderBarStyle::from_theme(&state.theme));
    Widget::render(header, area, buf);
}

fn render_content_area(state: &mut GalleryScreenState, area: Rect, buf: &mut Buffer) {
    let content_layout = Layout::horizontal([
        Constraint::Percentage(MAIN_PANE_WIDTH_PERCENT),
        Constraint::Min(0),
    ]);
    let [main_area, favorites_area] = content_layout.areas(area);

    let theme = state.theme;
    let tag_input = (state.focus == GalleryFocus::TagInput).then_some(&state.tag_input);

    let main_input = tag_input.filter(|_| state.main_pane.is_focused());
    StatefulWidget::render(
        GalleryGrid::new(&theme).tag_input(main_input),
        main_area,
        buf,
        &mut state.main_pane,
    );

    let favorites_input = tag_input.filter(|_| state.favorites_pane.is_focused());
    StatefulWidget::render(
        GalleryGrid::new(&theme).tag_input(favorites_input),
        favorites_area,
        buf,
        &mut state.favorites_pane,
    );
}

fn render_status_bar(
    gallery: &GalleryState,
    state: &GalleryScreenState,
    area: Rect,
    buf: &mut Buffer,
) {
    let bar = match &gallery.message {
        Some(message) => StatusBar::error(message.as_str()),
        None => StatusBar::new(),
    }
    .right(state.summary())
    .base_style(state.theme.base_style);
    Widget::render(&bar, area, buf);
}

fn render_footer_bar(
    gallery: &GalleryState,
    state: &GalleryScreenState,
    area: Rect,
    buf: &mut Buffer,
) {
    let focus_context = if state.modal.is_open() {
        FocusContext::Preview
    } else {
        state.focus.to_focus_context()
    };

    let right_info = match gallery.favorites.len() {
        0 => None,
        1 => Some("1 favorite".to_string()),
        n => Some(format!("{n} favorites")),
    };

    let footer = FooterBar::new(state.keymap.visible())
        .focus_context(focus_context)
        .right_info(right_info.as_deref())
        .style(FooterBarStyle::from_theme(&state.theme));
    Widget::render(footer, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn fox(n: usize) -> ImageRecord {
        ImageRecord::new(
            format!("https://randomfox.ca/images/{n}.jpg"),
            format!("https://randomfox.ca/?i={n}"),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut GalleryScreenState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn screen() -> GalleryScreenState {
        let mut state =
            GalleryScreenState::new(Keymap::default(), "Orange", ThemePreference::Light, None);
        state.show_batch(&[fox(1), fox(2)], &FavoritesList::new(), &TagMap::new());
        state
    }

    #[test]
    fn test_card_actions_target_selected_record() {
        let mut state = screen();

        assert_eq!(
            state.handle_key(key(KeyCode::Char('f'))),
            GalleryKeyResult::ToggleFavorite(fox(1))
        );
        state.handle_key(key(KeyCode::Right));
        assert_eq!(
            state.handle_key(key(KeyCode::Char('o'))),
            GalleryKeyResult::OpenLink("https://randomfox.ca/?i=2".to_string())
        );
    }

    #[test]
    fn test_actions_on_empty_pane_are_ignored() {
        let mut state =
            GalleryScreenState::new(Keymap::default(), "Orange", ThemePreference::Light, None);

        assert_eq!(
            state.handle_key(key(KeyCode::Char('f'))),
            GalleryKeyResult::Consumed
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('r'))),
            GalleryKeyResult::LoadMore
        );
    }

    #[test]
    fn test_search_flow() {
        let mut state = screen();

        state.handle_key(key(KeyCode::Char('/')));
        assert_eq!(state.focus(), GalleryFocus::Search);
        type_text(&mut state, "Cute");

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::Search("Cute".to_string())
        );
        assert_eq!(state.focus(), GalleryFocus::Main);
    }

    #[test]
    fn test_tag_flow_from_favorites() {
        let mut state = screen();
        state.show_favorites(&FavoritesList::from(vec![fox(5)]), &TagMap::new());
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus(), GalleryFocus::Favorites);

        state.handle_key(key(KeyCode::Char('t')));
        assert_eq!(state.focus(), GalleryFocus::TagInput);
        type_text(&mut state, "sleepy");

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::AddTag {
                record: fox(5),
                tag: "sleepy".to_string()
            }
        );
        assert_eq!(state.focus(), GalleryFocus::Favorites);
    }

    #[test]
    fn test_new_batch_cancels_tag_input_for_replaced_card() {
        let mut state = screen();
        state.handle_key(key(KeyCode::Char('t')));
        type_text(&mut state, "cu");

        state.show_batch(&[fox(7), fox(8)], &FavoritesList::new(), &TagMap::new());

        assert_eq!(state.focus(), GalleryFocus::Main);
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::Consumed
        );
    }

    #[test]
    fn test_rerender_keeping_card_keeps_tag_input() {
        let mut state = screen();
        state.handle_key(key(KeyCode::Char('t')));

        state.show_batch(&[fox(1), fox(9)], &FavoritesList::new(), &TagMap::new());
        state.show_favorites(&FavoritesList::from(vec![fox(3)]), &TagMap::new());
        assert_eq!(state.focus(), GalleryFocus::TagInput);
        type_text(&mut state, "cute");

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::AddTag {
                record: fox(1),
                tag: "cute".to_string()
            }
        );
    }

    #[test]
    fn test_tag_cancel_discards_input() {
        let mut state = screen();
        state.handle_key(key(KeyCode::Char('t')));
        type_text(&mut state, "wild");

        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            GalleryKeyResult::Consumed
        );
        assert_eq!(state.focus(), GalleryFocus::Main);

        state.handle_key(key(KeyCode::Char('t')));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::AddTag {
                record: fox(1),
                tag: String::new()
            }
        );
    }

    #[test]
    fn test_preview_without_picker_opens_text_overlay() {
        let mut state = screen();

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            GalleryKeyResult::Consumed
        );
        assert!(state.modal().is_open());
        assert_eq!(state.modal().source(), fox(1).image());

        assert_eq!(
            state.handle_key(key(KeyCode::Char('f'))),
            GalleryKeyResult::Consumed
        );
        state.handle_key(key(KeyCode::Esc));
        assert!(!state.modal().is_open());
        assert_eq!(state.modal().source(), "");
    }

    #[test]
    fn test_preview_with_picker_requests_download() {
        let mut state = GalleryScreenState::new(
            Keymap::default(),
            "Orange",
            ThemePreference::Dark,
            Some(Picker::halfblocks()),
        );
        state.show_batch(&[fox(3)], &FavoritesList::new(), &TagMap::new());

        assert_eq!(
            state.handle_key(key(KeyCode::Char('p'))),
            GalleryKeyResult::LoadPreview(fox(3).image().to_string())
        );
    }

    #[test]
    fn test_summary_tracks_main_content() {
        let mut state = screen();
        assert_eq!(state.summary(), "2 foxes");

        state.show_search_results("cute", &[fox(2)], &FavoritesList::new(), &TagMap::new());
        assert_eq!(state.summary(), "1 tagged 'cute'");
    }

    #[test]
    fn test_renders_full_screen() {
        let mut state =
            GalleryScreenState::new(Keymap::default(), "Orange", ThemePreference::Light, None);
        let gallery = GalleryState {
            message: Some("Failed to load fox images. Please try again.".to_string()),
            ..GalleryState::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal
            .draw(|frame| {
                frame.render_stateful_widget(
                    GalleryScreen::new(&gallery),
                    frame.area(),
                    &mut state,
                );
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(text.contains("FOXGALLERY"));
        assert!(text.contains("No foxes found."));
        assert!(text.contains("Failed to load fox images. Please try again."));
        assert!(text.contains("☾"));
    }
}
