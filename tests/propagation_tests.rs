//! End-to-end propagation scenarios through the public selector API
//!
//! These tests verify:
//! - Downward and upward propagation on the demo catalog
//! - Manual/auto separation per level
//! - Reset semantics
//! - Levels beyond three

use cascade_select::{Catalog, CascadeError, Item, Level, MultiSelector, SelectionMark, demo_levels};
use std::collections::BTreeSet;

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;

fn demo() -> MultiSelector {
    MultiSelector::new(Catalog::new(demo_levels()).unwrap())
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn auto(selector: &MultiSelector, level: usize) -> BTreeSet<String> {
    selector.auto_selection(level).unwrap().clone()
}

// =============================================================================
// Demo catalog scenarios
// =============================================================================

#[test]
fn test_select_a1_reaches_b_and_c() {
    let mut selector = demo();
    selector.toggle_selection(A, "a1").unwrap();

    assert_eq!(auto(&selector, B), set(&["b1", "b2"]));
    assert_eq!(auto(&selector, C), set(&["c1", "c2"]));
    assert!(auto(&selector, A).is_empty());
}

#[test]
fn test_select_a0_transitive_chain() {
    let mut selector = demo();
    selector.toggle_selection(A, "a0").unwrap();

    assert!(auto(&selector, B).is_superset(&set(&["b0", "b1"])));
    assert!(auto(&selector, C).is_superset(&set(&["c0", "c1"])));
}

#[test]
fn test_select_c1_propagates_upward() {
    let mut selector = demo();
    selector.toggle_selection(C, "c1").unwrap();

    assert_eq!(auto(&selector, B), set(&["b0", "b1"]));
    assert_eq!(auto(&selector, A), set(&["a0", "a1"]));
    assert!(auto(&selector, C).is_empty());
}

#[test]
fn test_select_b1_multi_source_union_is_exact() {
    let mut selector = demo();
    selector.toggle_selection(B, "b1").unwrap();

    assert_eq!(auto(&selector, A), set(&["a0", "a1"]));
    assert_eq!(auto(&selector, C), set(&["c1", "c2"]));
}

#[test]
fn test_mixed_a_and_c_selection() {
    let mut selector = demo();
    selector.toggle_selection(A, "a1").unwrap();
    selector.toggle_selection(C, "c2").unwrap();

    let a = auto(&selector, A);
    assert!(a.contains("a2"));
    assert!(!a.contains("a1"));
    assert!(auto(&selector, B).is_superset(&set(&["b1", "b2"])));
    assert_eq!(auto(&selector, C), set(&["c1"]));
}

#[test]
fn test_manual_and_auto_never_overlap() {
    let mut selector = demo();
    selector.set_selection(A, ["a0", "a1"]).unwrap();
    selector.set_selection(B, ["b0", "b2"]).unwrap();
    selector.set_selection(C, ["c1"]).unwrap();

    for level in 0..selector.level_count() {
        let manual = selector.manual_selection(level).unwrap();
        let derived = selector.auto_selection(level).unwrap();
        assert!(manual.is_disjoint(derived), "level {} overlaps", level);
    }
}

#[test]
fn test_marks_follow_selection() {
    let mut selector = demo();
    selector.toggle_selection(A, "a1").unwrap();

    assert_eq!(selector.mark(A, "a1"), SelectionMark::Manual);
    assert_eq!(selector.mark(B, "b2"), SelectionMark::Auto);
    assert_eq!(selector.mark(C, "c0"), SelectionMark::None);
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_reset_clears_level_and_its_influence() {
    let mut selector = demo();
    selector.toggle_selection(A, "a1").unwrap();
    selector.toggle_selection(C, "c0").unwrap();

    selector.reset(A).unwrap();

    assert!(selector.manual_selection(A).unwrap().is_empty());
    // Only c0 remains: its parent chain is b0 -> a0
    assert_eq!(auto(&selector, A), set(&["a0"]));
    assert_eq!(auto(&selector, B), set(&["b0"]));
}

#[test]
fn test_reset_all_clears_everything() {
    let mut selector = demo();
    selector.toggle_selection(B, "b2").unwrap();
    selector.reset_all();

    for level in 0..selector.level_count() {
        assert!(selector.manual_selection(level).unwrap().is_empty());
        assert!(selector.auto_selection(level).unwrap().is_empty());
    }
}

#[test]
fn test_toggle_twice_restores_empty_state() {
    let mut selector = demo();
    assert!(selector.toggle_selection(B, "b1").unwrap());
    assert!(!selector.toggle_selection(B, "b1").unwrap());

    assert!(selector.derived().iter().all(BTreeSet::is_empty));
}

// =============================================================================
// Errors and lenient inputs
// =============================================================================

#[test]
fn test_toggle_unknown_id_is_not_found() {
    let mut selector = demo();
    selector.toggle_selection(A, "a0").unwrap();

    let err = selector.toggle_selection(A, "zz").unwrap_err();
    assert!(matches!(err, CascadeError::NotFound { level: 0, .. }));
    assert_eq!(selector.manual_selection(A).unwrap(), &set(&["a0"]));
}

#[test]
fn test_set_with_unknown_ids_matches_nothing() {
    let mut selector = demo();
    selector.set_selection(B, ["ghost"]).unwrap();

    assert_eq!(selector.manual_selection(B).unwrap(), &set(&["ghost"]));
    assert!(auto(&selector, A).is_empty());
    assert!(auto(&selector, C).is_empty());
}

// =============================================================================
// N-level catalogs
// =============================================================================

#[test]
fn test_four_level_chain_propagates_both_ways() {
    let catalog = Catalog::new(vec![
        Level::new("w", vec![Item::new("w0", "w0"), Item::new("w1", "w1")]),
        Level::new("x", vec![Item::new("x0", "x0").with_sources(["w0"])]),
        Level::new("y", vec![Item::new("y0", "y0").with_sources(["x0"])]),
        Level::new(
            "z",
            vec![
                Item::new("z0", "z0").with_sources(["y0"]),
                Item::new("z1", "z1"),
            ],
        ),
    ])
    .unwrap();
    let mut selector = MultiSelector::new(catalog);

    selector.toggle_selection(0, "w0").unwrap();
    assert_eq!(auto(&selector, 3), set(&["z0"]));

    selector.reset_all();
    selector.toggle_selection(3, "z0").unwrap();
    assert_eq!(auto(&selector, 0), set(&["w0"]));
    assert_eq!(auto(&selector, 1), set(&["x0"]));
    assert_eq!(auto(&selector, 2), set(&["y0"]));
}
