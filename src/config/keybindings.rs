//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Printable characters never reach the bindings; the event loop inserts
/// them into the query first.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        // Suggestion selection
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::SelectPrevious,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::SelectNext,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            KeyAction::PagePrevious,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            KeyAction::PageNext,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::Submit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::CloseSuggestions,
        );

        // Query editing
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            KeyAction::CursorLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            KeyAction::CursorRight,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            KeyAction::CursorHome,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            KeyAction::CursorEnd,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::DeleteBackward,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE),
            KeyAction::DeleteForward,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            KeyAction::ClearQuery,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::NextExample,
        );

        // Application
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_and_pages_select_suggestions() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyAction::SelectPrevious)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(KeyAction::SelectNext)
        );
        assert_eq!(
            bindings.get(key(KeyCode::PageUp, KeyModifiers::NONE)),
            Some(KeyAction::PagePrevious)
        );
        assert_eq!(
            bindings.get(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(KeyAction::PageNext)
        );
    }

    #[test]
    fn enter_submits_and_esc_closes() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyAction::Submit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyAction::CloseSuggestions)
        );
    }

    #[test]
    fn control_chords_clear_and_quit() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(KeyAction::ClearQuery)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn plain_characters_are_unbound() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    }
}
