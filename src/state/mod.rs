//! Search bar state machines (pure).
//!
//! All state transitions are pure functions of their inputs plus an explicit
//! `Instant`, testable without a terminal or network.

pub mod debounce;
pub mod search_input;
pub mod suggestions;

// Re-export for convenience
pub use debounce::DebounceTimer;
pub use search_input::{InputOutcome, SearchInputController, EXAMPLE_CURIES};
pub use suggestions::{FetchRequest, SuggestionController, SuggestionPhase, SuggestionSettings};
