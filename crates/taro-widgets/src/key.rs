//! Key binding definitions and the select's key map.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// A human-readable description of the action this binding performs.
    pub description: String,
    /// Whether this binding is currently active. Disabled bindings never match.
    pub enabled: bool,
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code (e.g. a character, arrow key, or function key).
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a new binding for a single key combination with the given description.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Create a new binding for multiple key combinations with the given description.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Return whether the given key event matches any of this binding's key combinations.
    ///
    /// Always returns `false` when the binding is disabled, and for key
    /// releases on terminals that report them.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.enabled || event.kind == KeyEventKind::Release {
            return false;
        }
        self.keys
            .iter()
            .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }

    /// Set whether this binding is enabled. Disabled bindings never match key events.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    /// Create a key combination with the Shift modifier.
    pub fn shift(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::SHIFT)
    }

    /// Create a key combination with an explicit set of modifier keys.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

/// Keys the [`Select`](crate::select::Select) responds to.
///
/// Hosts can rebind or disable any action before handing the map to
/// [`Select::with_key_map`](crate::select::Select::with_key_map).
#[derive(Debug, Clone)]
pub struct SelectKeyMap {
    /// Opens the closed list.
    pub open: Binding,
    /// Focuses the next enabled option.
    pub next: Binding,
    /// Focuses the previous enabled option.
    pub previous: Binding,
    /// Focuses the first enabled option.
    pub first: Binding,
    /// Focuses the last enabled option.
    pub last: Binding,
    /// Chooses the focused option.
    pub activate: Binding,
    /// Closes the list without choosing.
    pub dismiss: Binding,
    /// Focus leaves the select; closes the list.
    pub leave: Binding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        use KeyCode::*;
        Self {
            open: Binding::with_keys(
                vec![
                    KeyCombination::new(Enter),
                    KeyCombination::new(Char(' ')),
                    KeyCombination::new(Up),
                    KeyCombination::new(Down),
                ],
                "open",
            ),
            next: Binding::new(KeyCombination::new(Down), "next option"),
            previous: Binding::new(KeyCombination::new(Up), "previous option"),
            first: Binding::new(KeyCombination::new(Home), "first option"),
            last: Binding::new(KeyCombination::new(End), "last option"),
            activate: Binding::with_keys(
                vec![KeyCombination::new(Enter), KeyCombination::new(Char(' '))],
                "choose",
            ),
            dismiss: Binding::new(KeyCombination::new(Esc), "close"),
            leave: Binding::with_keys(
                vec![KeyCombination::new(Tab), KeyCombination::shift(BackTab)],
                "leave",
            ),
        }
    }
}

impl SelectKeyMap {
    /// Every binding, in the order they are checked while the list is open.
    pub fn bindings(&self) -> [&Binding; 8] {
        [
            &self.next,
            &self.previous,
            &self.first,
            &self.last,
            &self.activate,
            &self.dismiss,
            &self.leave,
            &self.open,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn binding_matches_any_of_its_keys() {
        let map = SelectKeyMap::default();
        assert!(map.activate.matches(&key(KeyCode::Enter)));
        assert!(map.activate.matches(&key(KeyCode::Char(' '))));
        assert!(!map.activate.matches(&key(KeyCode::Esc)));
    }

    #[test]
    fn disabled_binding_never_matches() {
        let binding = Binding::new(KeyCombination::new(KeyCode::Esc), "close").enabled(false);
        assert!(!binding.matches(&key(KeyCode::Esc)));
    }

    #[test]
    fn release_events_do_not_match() {
        let map = SelectKeyMap::default();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!map.open.matches(&release));
    }

    #[test]
    fn shift_tab_leaves() {
        let map = SelectKeyMap::default();
        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(map.leave.matches(&back));
        assert!(map.leave.matches(&key(KeyCode::Tab)));
    }

    #[test]
    fn open_keys_cover_arrows() {
        let map = SelectKeyMap::default();
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Char(' ')] {
            assert!(map.open.matches(&key(code)), "{code:?}");
        }
        assert!(!map.open.matches(&key(KeyCode::Home)));
    }

    #[test]
    fn every_default_binding_is_enabled() {
        let map = SelectKeyMap::default();
        assert!(map.bindings().iter().all(|b| b.enabled && !b.keys.is_empty()));
    }
}
