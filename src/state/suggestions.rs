//! Suggestion list controller (pure).
//!
//! Owns the debounce timer, the namespace candidates for the current query
//! and the selection cursor. It never performs I/O: when the timer fires it
//! hands out a [`FetchRequest`], and the host feeds the result back through
//! [`SuggestionController::complete_fetch`].
//!
//! ```text
//! Idle ──query change──▶ Debouncing ──timer──▶ Loading ──complete_fetch──▶ Idle
//!                            ▲                    │
//!                            └────query change────┘
//! ```

use crate::model::{NamespaceEntry, QueryParts, ValidityState};
use crate::parser::{evaluate_query, split_query};
use crate::state::debounce::DebounceTimer;
use std::time::{Duration, Instant};
use tracing::debug;

/// Settings for the suggestion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionSettings {
    /// Quiet period after the last query change before fetching.
    pub debounce: Duration,
    /// Maximum number of candidates kept.
    pub page_size: usize,
}

/// A namespace lookup the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation to hand back with the result.
    pub generation: u64,
    /// Raw query text.
    pub query: String,
    /// Maximum number of candidates wanted.
    pub page_size: usize,
}

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionPhase {
    /// Nothing pending; the list may be stale or empty.
    Idle,
    /// Timer armed; the list is unchanged.
    Debouncing,
    /// Fetch handed to the host and not settled yet.
    Loading,
}

/// Debounced namespace suggestions with keyboard selection.
#[derive(Debug)]
pub struct SuggestionController {
    settings: SuggestionSettings,
    query: String,
    timer: DebounceTimer,
    phase: SuggestionPhase,
    generation: u64,
    candidates: Vec<NamespaceEntry>,
    cursor: Option<usize>,
}

impl SuggestionController {
    /// Create a controller for `query` and arm its first timer.
    pub fn new(settings: SuggestionSettings, query: impl Into<String>, now: Instant) -> Self {
        let mut controller = Self {
            settings,
            query: query.into(),
            timer: DebounceTimer::new(settings.debounce),
            phase: SuggestionPhase::Idle,
            generation: 0,
            candidates: Vec::new(),
            cursor: None,
        };
        controller.restart_debounce(now);
        controller
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text and restart the debounce window.
    ///
    /// Any fetch still in flight becomes stale. Setting the text it already
    /// has is a no-op.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.restart_debounce(now);
    }

    fn restart_debounce(&mut self, now: Instant) {
        self.generation += 1;
        self.timer.arm(now);
        self.phase = SuggestionPhase::Debouncing;
        debug!(generation = self.generation, query = %self.query, "Debounce armed");
    }

    /// Deadline the host should wake up for, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Fire the timer if due.
    ///
    /// Returns the fetch to run, or `None` when the timer is not due or the
    /// query is empty (the list is then cleared without a fetch).
    pub fn poll_timer(&mut self, now: Instant) -> Option<FetchRequest> {
        if !self.timer.fire(now) {
            return None;
        }
        debug!(generation = self.generation, "Debounce fired");

        if self.query.is_empty() {
            self.candidates.clear();
            self.cursor = None;
            self.phase = SuggestionPhase::Idle;
            return None;
        }

        self.phase = SuggestionPhase::Loading;
        Some(FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            page_size: self.settings.page_size,
        })
    }

    /// Install the result of a fetch.
    ///
    /// The list is replaced wholesale and the cursor moves to the candidate
    /// whose prefix equals the query's effective prefix (or to no
    /// selection). Replies for an older generation are discarded and
    /// `false` is returned.
    pub fn complete_fetch(&mut self, generation: u64, mut entries: Vec<NamespaceEntry>) -> bool {
        if generation != self.generation || self.phase != SuggestionPhase::Loading {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale namespace reply"
            );
            return false;
        }

        entries.truncate(self.settings.page_size);
        let effective_prefix = split_query(&self.query).prefix_effective_value;
        self.cursor = entries.iter().position(|ns| ns.prefix == effective_prefix);
        self.candidates = entries;
        self.phase = SuggestionPhase::Idle;

        debug!(
            count = self.candidates.len(),
            cursor = ?self.cursor,
            "Namespace candidates installed"
        );
        true
    }

    /// Cancel the pending timer and invalidate any fetch in flight.
    pub fn shutdown(&mut self) {
        self.timer.cancel();
        self.generation += 1;
        self.phase = SuggestionPhase::Idle;
    }

    /// Current phase.
    pub fn phase(&self) -> SuggestionPhase {
        self.phase
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == SuggestionPhase::Loading
    }

    /// Current candidates.
    pub fn candidates(&self) -> &[NamespaceEntry] {
        &self.candidates
    }

    /// Selected index, `None` for no selection.
    pub fn selected(&self) -> Option<usize> {
        self.cursor
    }

    /// Selected candidate.
    pub fn selected_entry(&self) -> Option<&NamespaceEntry> {
        self.cursor.and_then(|i| self.candidates.get(i))
    }

    /// Whether a candidate is selected.
    pub fn has_selection(&self) -> bool {
        self.cursor.is_some()
    }

    /// Select `index` directly (hover). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.cursor = Some(index);
        }
    }

    /// Move the selection up by `n`.
    ///
    /// From no selection the cursor goes to the first entry. Returns the new
    /// index when the cursor moved, `None` otherwise.
    pub fn up(&mut self, n: usize) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(0) => return None,
            Some(current) => current.saturating_sub(n),
        };
        self.move_to(next)
    }

    /// Move the selection down by `n`, saturating at the last entry.
    pub fn down(&mut self, n: usize) -> Option<usize> {
        let last = self.candidates.len().checked_sub(1)?;
        let next = match self.cursor {
            None => 0,
            Some(current) if current >= last => return None,
            Some(current) => current.saturating_add(n).min(last),
        };
        self.move_to(next)
    }

    fn move_to(&mut self, next: usize) -> Option<usize> {
        if self.cursor == Some(next) {
            return None;
        }
        self.cursor = Some(next);
        Some(next)
    }

    /// The candidate a click on the current selection acts on.
    pub fn click_selection(&self) -> Option<NamespaceEntry> {
        self.selected_entry().cloned()
    }

    /// Classify the current query.
    ///
    /// Reports `QueryingNamespaces` while a fetch is outstanding, otherwise
    /// evaluates against the current candidates.
    pub fn evaluate(&self) -> (ValidityState, QueryParts) {
        if self.is_loading() {
            return (ValidityState::QueryingNamespaces, split_query(&self.query));
        }
        evaluate_query(&self.query, &self.candidates)
    }
}

impl Drop for SuggestionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "suggestions_tests.rs"]
mod tests;
