//! Full-size image preview overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};
use ratatui_image::StatefulImage;
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use tracing::debug;

use crate::infrastructure::image::PreviewLoadedEvent;
use crate::presentation::theme::Theme;

const OVERLAY_PERCENT: u16 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    /// Overlay shows only the URL.
    TextOnly,
    Loading,
    Ready,
    Failed(String),
}

/// Overlay state.
///
/// Closing resets the source to empty and drops the decoded image, so the
/// next open never shows the previous picture.
pub struct ImageModal {
    open: bool,
    source: String,
    status: PreviewStatus,
    protocol: Option<StatefulProtocol>,
    picker: Option<Picker>,
}

impl ImageModal {
    /// Creates a closed overlay.
    ///
    /// Without a picker the overlay never downloads and shows the URL only.
    #[must_use]
    pub fn new(picker: Option<Picker>) -> Self {
        Self {
            open: false,
            source: String::new(),
            status: PreviewStatus::TextOnly,
            protocol: None,
            picker,
        }
    }

    /// Queries the terminal for its graphics protocol.
    ///
    /// Must run after the terminal has entered raw mode.
    #[must_use]
    pub fn detect_picker() -> Picker {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Sixel));
        let has_kitty = caps
            .iter()
            .any(|c| matches!(c, ratatui_image::picker::Capability::Kitty));

        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        debug!(protocol = ?picker.protocol_type(), "Image protocol selected");
        picker
    }

    /// Opens the overlay on `url`.
    ///
    /// Returns whether the caller should start downloading the image.
    pub fn open(&mut self, url: &str) -> bool {
        self.open = true;
        self.source = url.to_string();
        self.protocol = None;

        if self.picker.is_some() && !url.is_empty() {
            self.status = PreviewStatus::Loading;
            true
        } else {
            self.status = PreviewStatus::TextOnly;
            false
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.source.clear();
        self.protocol = None;
        self.status = PreviewStatus::TextOnly;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn status(&self) -> &PreviewStatus {
        &self.status
    }

    /// Applies a finished download.
    ///
    /// Results for a closed overlay or a different image are dropped.
    /// Returns whether the event was applied.
    pub fn apply(&mut self, event: PreviewLoadedEvent) -> bool {
        if !self.open || event.url != self.source {
            debug!(url = %event.url, "Discarding stale preview");
            return false;
        }

        match (event.result, &self.picker) {
            (Ok(image), Some(picker)) => {
                self.protocol = Some(picker.new_resize_protocol((*image).clone()));
                self.status = PreviewStatus::Ready;
            }
            (Ok(_), None) => self.status = PreviewStatus::TextOnly,
            (Err(e), _) => self.status = PreviewStatus::Failed(e.user_message()),
        }
        true
    }
}

/// Draws an open [`ImageModal`] centered over `area`.
pub struct ImageModalView<'a> {
    theme: &'a Theme,
}

impl<'a> ImageModalView<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for ImageModalView<'_> {
    type State = ImageModal;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.open {
            return;
        }

        let theme = self.theme;
        let overlay = centered(area, OVERLAY_PERCENT);
        Clear.render(overlay, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border_style)
            .style(theme.base_style)
            .title(" Preview ")
            .title_bottom(Line::from(" Esc close ").alignment(Alignment::Right));
        let inner = block.inner(overlay);
        block.render(overlay, buf);

        let [picture_area, source_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);

        let message = match &state.status {
            PreviewStatus::Ready => None,
            PreviewStatus::Loading => Some(Span::styled("Loading preview…", theme.dimmed_style)),
            PreviewStatus::TextOnly => Some(Span::styled(
                "Image preview is off for this terminal.",
                theme.dimmed_style,
            )),
            PreviewStatus::Failed(text) => Some(Span::styled(text.clone(), theme.error_style)),
        };

        match (&mut state.protocol, message) {
            (Some(protocol), None) => {
                StatefulWidget::render(
                    StatefulImage::<StatefulProtocol>::default(),
                    picture_area,
                    buf,
                    protocol,
                );
            }
            (_, message) => {
                let y = picture_area.y + picture_area.height / 2;
                Paragraph::new(Line::from(message.unwrap_or_default()))
                    .alignment(Alignment::Center)
                    .render(Rect::new(picture_area.x, y, picture_area.width, 1), buf);
            }
        }

        Paragraph::new(Line::styled(state.source.clone(), theme.dimmed_style))
            .wrap(Wrap { trim: true })
            .render(source_area, buf);
    }
}

fn centered(area: Rect, percent: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent) / 2),
        Constraint::Percentage(percent),
        Constraint::Percentage((100 - percent) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent) / 2),
        Constraint::Percentage(percent),
        Constraint::Percentage((100 - percent) / 2),
    ])
    .areas(middle);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::GalleryError;
    use std::sync::Arc;

    const URL: &str = "https://randomfox.ca/images/9.jpg";

    fn loaded(url: &str) -> PreviewLoadedEvent {
        PreviewLoadedEvent {
            url: url.to_string(),
            result: Ok(Arc::new(image::DynamicImage::new_rgb8(4, 4))),
        }
    }

    #[test]
    fn test_close_resets_source() {
        let mut modal = ImageModal::new(None);
        assert!(!modal.open(URL));
        assert!(modal.is_open());
        assert_eq!(modal.source(), URL);

        modal.close();

        assert!(!modal.is_open());
        assert_eq!(modal.source(), "");
    }

    #[test]
    fn test_open_with_picker_requests_download() {
        let mut modal = ImageModal::new(Some(Picker::halfblocks()));

        assert!(modal.open(URL));
        assert_eq!(modal.status(), &PreviewStatus::Loading);
        assert!(!modal.open(""));
    }

    #[test]
    fn test_apply_ignores_stale_results() {
        let mut modal = ImageModal::new(Some(Picker::halfblocks()));
        modal.open(URL);

        assert!(!modal.apply(loaded("https://randomfox.ca/images/1.jpg")));
        assert_eq!(modal.status(), &PreviewStatus::Loading);

        modal.close();
        assert!(!modal.apply(loaded(URL)));
    }

    #[test]
    fn test_apply_success_and_failure() {
        let mut modal = ImageModal::new(Some(Picker::halfblocks()));
        modal.open(URL);
        assert!(modal.apply(loaded(URL)));
        assert_eq!(modal.status(), &PreviewStatus::Ready);

        modal.open(URL);
        modal.apply(PreviewLoadedEvent {
            url: URL.to_string(),
            result: Err(GalleryError::preview("HTTP 404")),
        });
        assert_eq!(
            modal.status(),
            &PreviewStatus::Failed("Could not load preview: HTTP 404".to_string())
        );
    }

    #[test]
    fn test_draws_source_when_text_only() {
        let theme = Theme::default();
        let mut modal = ImageModal::new(None);
        modal.open(URL);

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ImageModalView::new(&theme).render(area, &mut buf, &mut modal);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Preview"));
        assert!(text.contains("randomfox.ca/images/9.jpg"));
    }
}
