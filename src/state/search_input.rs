//! Search box controller (pure state transitions).
//!
//! Owns the query text and edit cursor, opens and feeds the
//! [`SuggestionController`], and derives the submit flag from the validity
//! state in two explicit steps: evaluate `(state, parts)`, then project the
//! state into `is_submittable`.

use crate::model::{NamespaceEntry, QueryParts, ValidityState};
use crate::parser::complete_query;
use crate::search::{id_detection_tokens, possible_local_id};
use crate::state::suggestions::{FetchRequest, SuggestionController, SuggestionSettings};
use std::time::Instant;
use tracing::debug;

/// Example compact identifiers offered above the search box.
pub const EXAMPLE_CURIES: [&str; 3] = ["uniprot:P12345", "pdb:2gc4", "taxonomy:9606"];

/// What an input operation did to the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing changed.
    Unchanged,
    /// Query text or cursor changed.
    Edited,
    /// A valid CURIE was submitted for resolution.
    Submitted(String),
    /// The selected suggestion was applied to the query.
    SuggestionApplied(String),
}

/// Search box state.
#[derive(Debug)]
pub struct SearchInputController {
    settings: SuggestionSettings,
    query: String,
    /// Cursor position in characters, `0..=query.chars().count()`.
    cursor: usize,
    suggestions: Option<SuggestionController>,
    next_example: usize,
    validity: ValidityState,
    parts: QueryParts,
    submittable: bool,
}

impl SearchInputController {
    /// Create the search box with an initial query.
    ///
    /// Suggestions open immediately for a non-empty query.
    pub fn new(settings: SuggestionSettings, initial_query: impl Into<String>, now: Instant) -> Self {
        let query = initial_query.into();
        let mut input = Self {
            settings,
            cursor: query.chars().count(),
            query,
            suggestions: None,
            next_example: 0,
            validity: ValidityState::NoCurie,
            parts: QueryParts::default(),
            submittable: false,
        };
        if !input.query.is_empty() {
            input.suggestions = Some(SuggestionController::new(settings, input.query.clone(), now));
        }
        input.refresh();
        input
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last computed validity state.
    pub fn validity(&self) -> ValidityState {
        self.validity
    }

    /// Last computed query parts.
    pub fn parts(&self) -> &QueryParts {
        &self.parts
    }

    /// Whether submitting is currently enabled.
    pub fn is_submittable(&self) -> bool {
        self.submittable
    }

    /// Open suggestion list, if any.
    pub fn suggestions(&self) -> Option<&SuggestionController> {
        self.suggestions.as_ref()
    }

    /// Candidates of the open suggestion list (empty when closed).
    pub fn candidates(&self) -> &[NamespaceEntry] {
        self.suggestions
            .as_ref()
            .map(SuggestionController::candidates)
            .unwrap_or_default()
    }

    /// Deadline the host should wake up for.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.suggestions
            .as_ref()
            .and_then(SuggestionController::next_deadline)
    }

    // ===== Editing =====

    fn byte_offset(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map_or(self.query.len(), |(offset, _)| offset)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char, now: Instant) -> InputOutcome {
        let offset = self.byte_offset(self.cursor);
        self.query.insert(offset, ch);
        self.cursor += 1;
        self.query_changed(now)
    }

    /// Delete the character before the cursor.
    pub fn delete_backward(&mut self, now: Instant) -> InputOutcome {
        if self.cursor == 0 {
            return InputOutcome::Unchanged;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.query.remove(offset);
        self.cursor -= 1;
        self.query_changed(now)
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self, now: Instant) -> InputOutcome {
        if self.cursor >= self.query.chars().count() {
            return InputOutcome::Unchanged;
        }
        let offset = self.byte_offset(self.cursor);
        self.query.remove(offset);
        self.query_changed(now)
    }

    /// Move the cursor one character left (saturating).
    pub fn move_left(&mut self) -> InputOutcome {
        self.move_cursor_to(self.cursor.saturating_sub(1))
    }

    /// Move the cursor one character right (saturating).
    pub fn move_right(&mut self) -> InputOutcome {
        self.move_cursor_to((self.cursor + 1).min(self.query.chars().count()))
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) -> InputOutcome {
        self.move_cursor_to(0)
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) -> InputOutcome {
        self.move_cursor_to(self.query.chars().count())
    }

    fn move_cursor_to(&mut self, cursor: usize) -> InputOutcome {
        if cursor == self.cursor {
            return InputOutcome::Unchanged;
        }
        self.cursor = cursor;
        InputOutcome::Edited
    }

    /// Empty the query.
    pub fn clear(&mut self, now: Instant) -> InputOutcome {
        if self.query.is_empty() {
            return InputOutcome::Unchanged;
        }
        self.set_query(String::new(), now)
    }

    /// Replace the whole query, cursor at the end.
    ///
    /// The same text only moves the cursor; no new lookup is started.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) -> InputOutcome {
        let query = query.into();
        if query == self.query {
            return self.move_end();
        }
        self.query = query;
        self.cursor = self.query.chars().count();
        self.query_changed(now)
    }

    /// Replace the query with the next example CURIE (cycling).
    pub fn fill_next_example(&mut self, now: Instant) -> InputOutcome {
        let example = EXAMPLE_CURIES[self.next_example % EXAMPLE_CURIES.len()];
        self.next_example = (self.next_example + 1) % EXAMPLE_CURIES.len();
        self.set_query(example, now)
    }

    /// Any edit reopens the suggestions and restarts their debounce.
    fn query_changed(&mut self, now: Instant) -> InputOutcome {
        match self.suggestions.as_mut() {
            Some(suggestions) => suggestions.set_query(self.query.clone(), now),
            None => {
                self.suggestions = Some(SuggestionController::new(
                    self.settings,
                    self.query.clone(),
                    now,
                ))
            }
        }
        self.refresh();
        InputOutcome::Edited
    }

    /// Close the suggestion list. Validity keeps its last value.
    pub fn close_suggestions(&mut self) -> InputOutcome {
        match self.suggestions.take() {
            Some(_) => InputOutcome::Edited,
            None => InputOutcome::Unchanged,
        }
    }

    // ===== Suggestions =====

    /// Advance the debounce timer; returns a fetch for the host to run.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        let request = self.suggestions.as_mut()?.poll_timer(now);
        self.refresh();
        request
    }

    /// Hand a fetch result to the open suggestion list.
    pub fn complete_fetch(&mut self, generation: u64, entries: Vec<NamespaceEntry>) -> bool {
        let Some(suggestions) = self.suggestions.as_mut() else {
            debug!(generation, "Suggestions closed, dropping namespace reply");
            return false;
        };
        let accepted = suggestions.complete_fetch(generation, entries);
        if accepted {
            self.refresh();
        }
        accepted
    }

    /// Move the suggestion selection up by `n`.
    pub fn select_previous(&mut self, n: usize) -> Option<usize> {
        self.suggestions.as_mut()?.up(n)
    }

    /// Move the suggestion selection down by `n`.
    pub fn select_next(&mut self, n: usize) -> Option<usize> {
        self.suggestions.as_mut()?.down(n)
    }

    /// Enter: apply the selected suggestion, else submit a valid CURIE.
    ///
    /// A selection whose completion is the query itself submits it.
    pub fn handle_enter(&mut self, now: Instant) -> InputOutcome {
        let selected = self
            .suggestions
            .as_ref()
            .and_then(SuggestionController::click_selection);

        if let Some(namespace) = selected {
            let completed = self.completion_for(&namespace);
            if completed == self.query && self.submittable {
                return InputOutcome::Submitted(self.query.clone());
            }
            debug!(prefix = %namespace.prefix, %completed, "Applying suggestion");
            self.set_query(completed.clone(), now);
            return InputOutcome::SuggestionApplied(completed);
        }

        if self.submittable {
            return InputOutcome::Submitted(self.query.clone());
        }
        InputOutcome::Unchanged
    }

    /// Query produced by clicking `namespace`.
    ///
    /// Keeps the resource and the one query token the namespace pattern
    /// recognises as a local id.
    pub fn completion_for(&self, namespace: &NamespaceEntry) -> String {
        let tokens = id_detection_tokens(&self.query);
        let id = possible_local_id(&tokens, &namespace.lui_pattern).unwrap_or("");
        let parts = crate::parser::split_query(&self.query);
        complete_query(parts.resource(), namespace, id)
    }

    /// Two-step pipeline: classify, then project into the submit flag.
    fn refresh(&mut self) {
        if let Some(suggestions) = self.suggestions.as_ref() {
            let (validity, parts) = suggestions.evaluate();
            self.validity = validity;
            self.parts = parts;
        }
        self.submittable = self.validity.is_submittable();
    }
}

#[cfg(test)]
#[path = "search_input_tests.rs"]
mod tests;
