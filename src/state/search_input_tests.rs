//! Tests for the search box controller.

use super::*;
use crate::state::SuggestionPhase;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(600);

fn settings() -> SuggestionSettings {
    SuggestionSettings {
        debounce: DEBOUNCE,
        page_size: 25,
    }
}

fn uniprot() -> NamespaceEntry {
    NamespaceEntry::new("uniprot", "UniProt Knowledgebase", "^[A-Z0-9]{6,10}$", "P0DP23")
}

fn go() -> NamespaceEntry {
    NamespaceEntry::new("go", "Gene Ontology", r"^GO:\d{7}$", "0006915")
}

/// Run the debounce and answer the fetch with `entries`.
fn settle(input: &mut SearchInputController, now: Instant, entries: Vec<NamespaceEntry>) -> Instant {
    let later = now + DEBOUNCE;
    let request = input.tick(later).expect("fetch should be requested");
    assert!(input.complete_fetch(request.generation, entries));
    later
}

// ===== Editing tests =====

#[test]
fn empty_start_has_no_suggestions() {
    let input = SearchInputController::new(settings(), "", Instant::now());

    assert_eq!(input.query(), "");
    assert!(input.suggestions().is_none());
    assert_eq!(input.validity(), ValidityState::NoCurie);
    assert!(!input.is_submittable());
}

#[test]
fn typing_opens_suggestions() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "", now);

    assert_eq!(input.insert_char('u', now), InputOutcome::Edited);

    assert_eq!(input.query(), "u");
    assert_eq!(input.cursor(), 1);
    assert!(input.suggestions().is_some());
    assert_eq!(input.next_deadline(), Some(now + DEBOUNCE));
}

#[test]
fn insert_in_the_middle_respects_multibyte_chars() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "aé", now);
    input.move_left();
    input.insert_char('x', now);

    assert_eq!(input.query(), "axé");
    assert_eq!(input.cursor(), 2);
}

#[test]
fn delete_backward_and_forward() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "abc", now);
    input.move_home();

    assert_eq!(input.delete_backward(now), InputOutcome::Unchanged);
    assert_eq!(input.delete_forward(now), InputOutcome::Edited);
    assert_eq!(input.query(), "bc");

    input.move_end();
    assert_eq!(input.delete_forward(now), InputOutcome::Unchanged);
    assert_eq!(input.delete_backward(now), InputOutcome::Edited);
    assert_eq!(input.query(), "b");
}

#[test]
fn cursor_moves_saturate() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "ab", now);

    assert_eq!(input.move_right(), InputOutcome::Unchanged);
    input.move_home();
    assert_eq!(input.move_left(), InputOutcome::Unchanged);
    assert_eq!(input.cursor(), 0);
}

#[test]
fn clear_empties_query() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot", now);

    assert_eq!(input.clear(now), InputOutcome::Edited);
    assert_eq!(input.query(), "");
    assert_eq!(input.clear(now), InputOutcome::Unchanged);
}

#[test]
fn examples_cycle() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "", now);

    input.fill_next_example(now);
    assert_eq!(input.query(), "uniprot:P12345");
    input.fill_next_example(now);
    assert_eq!(input.query(), "pdb:2gc4");
    input.fill_next_example(now);
    input.fill_next_example(now);
    assert_eq!(input.query(), "uniprot:P12345");
}

// ===== Validity / submit tests =====

#[test]
fn querying_namespaces_while_fetch_in_flight() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot:P12345", now);

    assert!(input.tick(now + DEBOUNCE).is_some());
    assert_eq!(input.validity(), ValidityState::QueryingNamespaces);
    assert!(!input.is_submittable());
}

#[test]
fn valid_curie_enables_submit() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot:P12345", now);
    let now = settle(&mut input, now, vec![uniprot()]);

    assert_eq!(input.validity(), ValidityState::ValidCurie);
    assert!(input.is_submittable());

    input.close_suggestions();
    assert_eq!(
        input.handle_enter(now),
        InputOutcome::Submitted("uniprot:P12345".to_string())
    );
}

#[test]
fn enter_submits_valid_curie_with_list_open() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot:P12345", now);
    let now = settle(&mut input, now, vec![uniprot()]);

    // The matching candidate is selected; completing it changes nothing.
    assert_eq!(input.suggestions().unwrap().selected(), Some(0));
    assert_eq!(
        input.handle_enter(now),
        InputOutcome::Submitted("uniprot:P12345".to_string())
    );
    assert_eq!(input.suggestions().unwrap().phase(), SuggestionPhase::Idle);
    assert_eq!(input.next_deadline(), None);
}

#[test]
fn setting_same_query_starts_no_lookup() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "pdb:2gc4", now);
    let now = settle(&mut input, now, vec![uniprot()]);
    input.move_home();

    assert_eq!(input.set_query("pdb:2gc4", now), InputOutcome::Edited);
    assert_eq!(input.cursor(), 8);
    assert_eq!(input.next_deadline(), None);
    assert_eq!(input.set_query("pdb:2gc4", now), InputOutcome::Unchanged);
}

#[test]
fn invalid_local_id_disables_submit() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot:###", now);
    let now = settle(&mut input, now, vec![uniprot()]);
    input.close_suggestions();

    assert_eq!(input.validity(), ValidityState::InvalidLocalId);
    assert_eq!(input.handle_enter(now), InputOutcome::Unchanged);
}

#[test]
fn closing_suggestions_keeps_last_validity() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot:", now);
    settle(&mut input, now, vec![uniprot()]);

    assert_eq!(input.close_suggestions(), InputOutcome::Edited);
    assert_eq!(input.validity(), ValidityState::PrefixWithColon);
    assert!(input.candidates().is_empty());
    assert_eq!(input.close_suggestions(), InputOutcome::Unchanged);
}

#[test]
fn edit_after_close_reopens_suggestions() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot", now);
    input.close_suggestions();

    input.insert_char(':', now);
    assert!(input.suggestions().is_some());
}

#[test]
fn reply_after_close_is_dropped() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "uniprot", now);
    let request = input.tick(now + DEBOUNCE).unwrap();
    input.close_suggestions();

    assert!(!input.complete_fetch(request.generation, vec![uniprot()]));
}

// ===== Suggestion click tests =====

#[test]
fn enter_applies_selected_suggestion_with_detected_id() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "protein P12345", now);
    let now = settle(&mut input, now, vec![uniprot()]);
    assert_eq!(input.select_next(1), Some(0));

    let outcome = input.handle_enter(now);

    assert_eq!(
        outcome,
        InputOutcome::SuggestionApplied("uniprot:P12345".to_string())
    );
    assert_eq!(input.query(), "uniprot:P12345");
    // Suggestions stay open and start a new debounce cycle.
    assert_eq!(input.next_deadline(), Some(now + DEBOUNCE));
}

#[test]
fn suggestion_completion_keeps_resource_and_pattern_prefix() {
    let now = Instant::now();
    let input = SearchInputController::new(settings(), "ebi/uniprot P12345", now);
    assert_eq!(input.completion_for(&uniprot()), "ebi/uniprot:P12345");

    let input = SearchInputController::new(settings(), "gene ontology", now);
    assert_eq!(input.completion_for(&go()), "GO:");
}

#[test]
fn suggestion_completion_keeps_prefixed_id_whole() {
    let now = Instant::now();
    let input = SearchInputController::new(settings(), "go:GO:0006915", now);
    let completed = input.completion_for(&go());

    assert!(completed.ends_with(":GO:0006915"), "got {completed}");
    let (state, _) = crate::parser::evaluate_query(&completed, &[go()]);
    assert_eq!(state, ValidityState::ValidCurie);
}

#[test]
fn selection_without_suggestions_is_noop() {
    let now = Instant::now();
    let mut input = SearchInputController::new(settings(), "", now);

    assert_eq!(input.select_next(1), None);
    assert_eq!(input.select_previous(5), None);
    assert_eq!(input.handle_enter(now), InputOutcome::Unchanged);
}
