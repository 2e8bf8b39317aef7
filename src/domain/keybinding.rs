use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ClearMessage,

    // Navigation / Focus
    FocusSearch,
    FocusNextPane,
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,

    // Gallery
    LoadMore,
    ToggleTheme,

    // Card Actions
    ToggleFavorite,
    AddTag,
    PreviewImage,
    OpenLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Short key name for the footer, e.g. `Tab` or `f`.
    #[must_use]
    pub fn key_label(&self) -> String {
        let base = match self.key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            other => format!("{other:?}"),
        };

        if self.key.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

/// Key table used while a gallery pane has focus.
#[derive(Debug, Clone)]
pub struct Keymap {
    binds: Vec<Keybind>,
}

impl Keymap {
    #[must_use]
    pub fn new(binds: Vec<Keybind>) -> Self {
        Self { binds }
    }

    /// Resolves a key press to an action.
    ///
    /// Shift is ignored for character keys so that terminals reporting
    /// `Shift+?`-style modifiers still match.
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.binds
            .iter()
            .find(|bind| {
                bind.key.code == key.code
                    && (bind.key.modifiers == key.modifiers
                        || (matches!(key.code, KeyCode::Char(_))
                            && key.modifiers - KeyModifiers::SHIFT == bind.key.modifiers))
            })
            .map(|bind| bind.action)
    }

    /// Returns bindings shown in the footer, first binding per action only.
    pub fn visible(&self) -> impl Iterator<Item = &Keybind> {
        self.binds.iter().enumerate().filter_map(|(i, bind)| {
            let first = !self.binds[..i].iter().any(|b| b.action == bind.action);
            (bind.visible_in_bar && first).then_some(bind)
        })
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let ctrl = |code| KeyEvent::new(code, KeyModifiers::CONTROL);

        Self::new(vec![
            Keybind::new(key(KeyCode::Char('/')), Action::FocusSearch, "Search"),
            Keybind::new(key(KeyCode::Char('r')), Action::LoadMore, "Load more"),
            Keybind::new(key(KeyCode::Char('f')), Action::ToggleFavorite, "Favorite"),
            Keybind::new(key(KeyCode::Char('t')), Action::AddTag, "Tag"),
            Keybind::new(key(KeyCode::Enter), Action::PreviewImage, "Preview"),
            Keybind::new(key(KeyCode::Char('p')), Action::PreviewImage, "Preview").hidden(),
            Keybind::new(key(KeyCode::Char('o')), Action::OpenLink, "Open link"),
            Keybind::new(key(KeyCode::Char('d')), Action::ToggleTheme, "Theme"),
            Keybind::new(key(KeyCode::Tab), Action::FocusNextPane, "Pane"),
            Keybind::new(key(KeyCode::Esc), Action::ClearMessage, "Clear").hidden(),
            Keybind::new(key(KeyCode::Up), Action::NavigateUp, "Up").hidden(),
            Keybind::new(key(KeyCode::Char('k')), Action::NavigateUp, "Up").hidden(),
            Keybind::new(key(KeyCode::Down), Action::NavigateDown, "Down").hidden(),
            Keybind::new(key(KeyCode::Char('j')), Action::NavigateDown, "Down").hidden(),
            Keybind::new(key(KeyCode::Left), Action::NavigateLeft, "Left").hidden(),
            Keybind::new(key(KeyCode::Char('h')), Action::NavigateLeft, "Left").hidden(),
            Keybind::new(key(KeyCode::Right), Action::NavigateRight, "Right").hidden(),
            Keybind::new(key(KeyCode::Char('l')), Action::NavigateRight, "Right").hidden(),
            Keybind::new(key(KeyCode::Char('q')), Action::Quit, "Quit"),
            Keybind::new(ctrl(KeyCode::Char('c')), Action::Quit, "Quit").hidden(),
        ])
    }
}
