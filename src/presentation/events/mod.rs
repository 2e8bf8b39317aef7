//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Key predicates shared by the text inputs and the gallery panes.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key should be handled at all.
    ///
    /// Some terminals report releases as separate events.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release
    }

    /// Checks if key force-quits from any focus.
    #[must_use]
    pub fn is_force_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Checks if key cancels the current input or overlay.
    #[must_use]
    pub fn is_cancel_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Esc,
                ..
            }
        )
    }

    /// Checks if key closes the preview overlay.
    #[must_use]
    pub fn is_close_overlay_event(key: &KeyEvent) -> bool {
        Self::is_cancel_event(key)
            || Self::is_submit_event(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Char('q'),
                    modifiers: KeyModifiers::NONE,
                    ..
                }
            )
    }
}
