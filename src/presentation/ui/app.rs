//! Main application orchestrator.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use ratatui_image::picker::Picker;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::{GalleryService, LoadImagesUseCase};
use crate::domain::entities::ImageRecord;
use crate::domain::errors::GalleryError;
use crate::domain::keybinding::Keymap;
use crate::infrastructure::{BrowserService, PreviewLoadedEvent, PreviewLoader};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{GalleryKeyResult, GalleryScreen, GalleryScreenState};

const SPINNER_TICK_RATE: Duration = Duration::from_millis(120);

#[derive(Debug)]
enum AppAction {
    ImagesLoaded(Result<Vec<ImageRecord>, GalleryError>),
    PreviewLoaded(PreviewLoadedEvent),
}

pub struct App {
    service: GalleryService,
    load_use_case: LoadImagesUseCase,
    preview_loader: PreviewLoader,
    browser: BrowserService,
    screen: GalleryScreenState,
    action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
    exiting: bool,
}

impl App {
    /// Creates the app and draws the restored favorites.
    ///
    /// Without a `picker` the preview overlay shows URLs only.
    #[must_use]
    pub fn new(
        service: GalleryService,
        load_use_case: LoadImagesUseCase,
        preview_loader: PreviewLoader,
        browser: BrowserService,
        accent_color: &str,
        picker: Option<Picker>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let state = service.state();
        let mut screen =
            GalleryScreenState::new(Keymap::default(), accent_color, state.theme, picker);
        screen.show_favorites(&state.favorites, &state.tags);

        Self {
            service,
            load_use_case,
            preview_loader,
            browser,
            screen,
            action_tx,
            action_rx,
            exiting: false,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.start_load();
        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut spinner_interval = interval(SPINNER_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(event) = terminal_event => {
                    match event {
                        Ok(event) => {
                            if self.handle_terminal_event(event) == EventResult::Exit {
                                self.exiting = true;
                            }
                        }
                        Err(e) => warn!(error = %e, "Terminal event error"),
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = spinner_interval.tick() => {
                    if self.service.state().loading {
                        self.screen.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(
            GalleryScreen::new(self.service.state()),
            frame.area(),
            &mut self.screen,
        );
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        match self.screen.handle_key(key) {
            GalleryKeyResult::Quit => return EventResult::Exit,
            GalleryKeyResult::Consumed => {}
            GalleryKeyResult::LoadMore => self.start_load(),
            GalleryKeyResult::Search(raw) => self.handle_search(&raw),
            GalleryKeyResult::ToggleFavorite(record) => self.handle_toggle_favorite(&record),
            GalleryKeyResult::AddTag { record, tag } => self.handle_add_tag(&record, &tag),
            GalleryKeyResult::ToggleTheme => {
                let preference = self.service.toggle_theme();
                self.screen.set_theme(preference);
            }
            GalleryKeyResult::LoadPreview(url) => self.load_preview(url),
            GalleryKeyResult::OpenLink(link) => {
                self.service.clear_message();
                if let Err(e) = self.browser.open(&link) {
                    self.service.report(&e);
                }
            }
            GalleryKeyResult::ClearMessage => self.service.clear_message(),
        }

        EventResult::Continue
    }

    fn start_load(&mut self) {
        if !self.service.begin_load() {
            return;
        }

        let use_case = self.load_use_case.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = use_case.execute().await;
            let _ = tx.send(AppAction::ImagesLoaded(result));
        });
    }

    fn load_preview(&mut self, url: String) {
        let loader = self.preview_loader.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let event = loader.load_event(url).await;
            let _ = tx.send(AppAction::PreviewLoaded(event));
        });
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::ImagesLoaded(result) => {
                if self.service.finish_load(result).is_ok() {
                    let state = self.service.state();
                    self.screen
                        .show_batch(&state.working, &state.favorites, &state.tags);
                }
            }
            AppAction::PreviewLoaded(event) => {
                if !self.screen.apply_preview(event) {
                    debug!("Preview result arrived after the overlay moved on");
                }
            }
        }
    }

    fn handle_search(&mut self, raw: &str) {
        match self.service.search(raw) {
            Ok(results) => {
                let state = self.service.state();
                let query = state.last_search.as_deref().unwrap_or_default();
                self.screen
                    .show_search_results(query, &results, &state.favorites, &state.tags);
            }
            Err(GalleryError::NotFound { query }) => {
                let state = self.service.state();
                self.screen
                    .show_search_results(&query, &[], &state.favorites, &state.tags);
            }
            Err(_) => {}
        }
    }

    fn handle_toggle_favorite(&mut self, record: &ImageRecord) {
        self.service.toggle_favorite(record);

        let state = self.service.state();
        self.screen
            .show_batch(&state.working, &state.favorites, &state.tags);
        self.screen.show_favorites(&state.favorites, &state.tags);
    }

    fn handle_add_tag(&mut self, record: &ImageRecord, tag: &str) {
        if let Some(tags) = self.service.add_tag(record, tag) {
            let tags = tags.to_vec();
            self.screen.refresh_tags(record.image(), &tags);
        }
    }
}
