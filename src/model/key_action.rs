//! Domain-level keyboard actions independent of key bindings.

/// Actions the resolution bar reacts to.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`crate::config::KeyBindings`]. Printable characters are handled as text
/// input before bindings are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Suggestion selection
    /// Move the selection up one suggestion. Default: ↑
    SelectPrevious,
    /// Move the selection down one suggestion. Default: ↓
    SelectNext,
    /// Move the selection up a page of suggestions. Default: Page Up
    PagePrevious,
    /// Move the selection down a page of suggestions. Default: Page Down
    PageNext,
    /// Click the selected suggestion, or submit a valid query. Default: Enter
    Submit,
    /// Hide the suggestion box. Default: Esc
    CloseSuggestions,

    // Query editing
    /// Move the text cursor left. Default: ←
    CursorLeft,
    /// Move the text cursor right. Default: →
    CursorRight,
    /// Move the text cursor to the start. Default: Home
    CursorHome,
    /// Move the text cursor to the end. Default: End
    CursorEnd,
    /// Delete the character before the cursor. Default: Backspace
    DeleteBackward,
    /// Delete the character under the cursor. Default: Delete
    DeleteForward,
    /// Clear the whole query. Default: Ctrl+u
    ClearQuery,
    /// Replace the query with the next example CURIE. Default: Tab
    NextExample,

    // Application
    /// Exit the application. Default: Ctrl+c
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_action_is_hashable_and_comparable() {
        let mut set = std::collections::HashSet::new();
        set.insert(KeyAction::SelectNext);
        set.insert(KeyAction::SelectNext);
        set.insert(KeyAction::SelectPrevious);
        assert_eq!(set.len(), 2);
        assert_ne!(KeyAction::PageNext, KeyAction::PagePrevious);
    }
}
