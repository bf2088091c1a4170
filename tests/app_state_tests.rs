//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Cursor and focus movement
//! - Key events driving the picker through App
//! - Help mode transitions

use cascade_select::app::{App, AppMode, AppState};
use cascade_select::{Catalog, MultiSelector, SelectionMark, demo_levels};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn demo_app() -> App {
    App::new(MultiSelector::new(Catalog::new(demo_levels()).unwrap()))
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

// =============================================================================
// AppState Tests
// =============================================================================

#[test]
fn test_app_state_starts_in_picker_on_first_level() {
    let state = AppState::new(3);
    assert_eq!(state.mode, AppMode::Picker);
    assert_eq!(state.focused_level, 0);
    assert_eq!(state.cursors, vec![0, 0, 0]);
    assert!(!state.status_message.is_empty());
}

#[test]
fn test_focus_wraps_both_ways() {
    let mut state = AppState::new(3);
    state.focus_previous();
    assert_eq!(state.focused_level, 2);
    state.focus_next();
    assert_eq!(state.focused_level, 0);
}

#[test]
fn test_cursor_clamps_to_item_count() {
    let mut state = AppState::new(2);
    state.move_cursor(-1, 3);
    assert_eq!(state.cursor(), 0);
    state.move_cursor(10, 3);
    assert_eq!(state.cursor(), 2);
}

#[test]
fn test_cursor_is_kept_per_level() {
    let mut state = AppState::new(2);
    state.move_cursor(1, 3);
    state.focus_next();
    assert_eq!(state.cursor(), 0);
    state.focus_previous();
    assert_eq!(state.cursor(), 1);
}

#[test]
fn test_empty_state_ignores_movement() {
    let mut state = AppState::new(0);
    state.focus_next();
    state.move_cursor(1, 5);
    assert_eq!(state.focused_level, 0);
    assert_eq!(state.cursor(), 0);
}

// =============================================================================
// Key Handling Tests
// =============================================================================

#[test]
fn test_space_toggles_item_under_cursor() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Down);
    assert_eq!(app.current_item_id(), Some("a1"));

    assert!(!press(&mut app, KeyCode::Char(' ')));
    assert_eq!(app.selector().mark(0, "a1"), SelectionMark::Manual);
    assert_eq!(app.selector().mark(1, "b2"), SelectionMark::Auto);
    assert_eq!(app.state().status_message, "Selected a1");

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selector().mark(0, "a1"), SelectionMark::None);
    assert_eq!(app.state().status_message, "Deselected a1");
}

#[test]
fn test_tab_and_arrows_move_between_levels() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focused_level, 1);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.state().focused_level, 2);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.state().focused_level, 1);
    app.handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(app.state().focused_level, 0);
}

#[test]
fn test_home_and_end() {
    let mut app = demo_app();
    press(&mut app, KeyCode::End);
    assert_eq!(app.current_item_id(), Some("a2"));
    press(&mut app, KeyCode::Home);
    assert_eq!(app.current_item_id(), Some("a0"));
}

#[test]
fn test_reset_keys() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Char(' ')); // a0
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' ')); // b0

    press(&mut app, KeyCode::Char('r'));
    assert!(app.selector().manual_selection(1).unwrap().is_empty());
    assert_eq!(app.selector().mark(0, "a0"), SelectionMark::Manual);

    app.handle_key_event(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
    assert!(app.selector().selection().is_empty());
}

#[test]
fn test_help_opens_and_esc_closes_it_before_quitting() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.state().mode, AppMode::Help);

    // Picker keys do nothing behind the overlay
    press(&mut app, KeyCode::Char(' '));
    assert!(app.selector().selection().is_empty());

    assert!(!press(&mut app, KeyCode::Esc));
    assert_eq!(app.state().mode, AppMode::Picker);
    assert!(press(&mut app, KeyCode::Esc));
}

#[test]
fn test_question_mark_toggles_help() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Char('?'));
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.state().mode, AppMode::Picker);
}

#[test]
fn test_quit_keys() {
    let mut app = demo_app();
    assert!(press(&mut app, KeyCode::Char('q')));
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut app = demo_app();
    assert!(!press(&mut app, KeyCode::Char('x')));
    assert_eq!(app.state().mode, AppMode::Picker);
}
