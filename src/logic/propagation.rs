//! Auto-selection propagation
//!
//! Derives, for every level, the items implied by manual selections on the
//! other levels through the source relation.
//!
//! # Rules
//!
//! | Direction | Walk                                   | Reaches                 |
//! |-----------|----------------------------------------|-------------------------|
//! | Downward  | manual ids on lower levels -> children | every later level       |
//! | Upward    | manual ids on higher levels -> sources | every earlier level     |
//!
//! A level's own manual selection is removed from its derived set but still
//! propagates to other levels. Unknown ids (dangling sources, ids stored by
//! `set` that are not in the catalog) match nothing and are skipped.
//!
//! # Algorithm
//!
//! Two linear sweeps over the level chain instead of one walk per pair of
//! levels:
//!
//! ```text
//! down[0] = {}          down[i] = children(manual[i-1] ∪ down[i-1])
//! up[n-1] = {}          up[i]   = parents(manual[i+1] ∪ up[i+1])
//! auto[i] = (down[i] ∪ up[i]) \ manual[i]
//! ```
//!
//! Both relations distribute over union, so carrying the previous level's
//! reach forward yields exactly the transitive closure from every manual id.
//!
//! Pure logic: no I/O, no side effects, deterministic output.

use std::collections::BTreeSet;

use tracing::trace;

use crate::catalog::Catalog;
use crate::error::{CascadeError, Result};
use crate::selection::SelectionState;

fn manual_at(manual: &[BTreeSet<String>], level: usize) -> impl Iterator<Item = &String> {
    manual.get(level).into_iter().flatten()
}

// ============================================================================
// Downward
// ============================================================================

/// Items reachable on each level by following children from manual
/// selections on earlier levels.
///
/// The result has one set per catalog level; the first is always empty.
pub fn downward_reach(catalog: &Catalog, manual: &[BTreeSet<String>]) -> Vec<BTreeSet<String>> {
    let mut down: Vec<BTreeSet<String>> = vec![BTreeSet::new(); catalog.len()];

    for level in 1..catalog.len() {
        let mut reached = BTreeSet::new();
        for id in manual_at(manual, level - 1).chain(down[level - 1].iter()) {
            for child in catalog.children_of(level - 1, id) {
                reached.insert(child.id.clone());
            }
        }
        down[level] = reached;
    }

    down
}

// ============================================================================
// Upward
// ============================================================================

/// Items reachable on each level by following sources from manual
/// selections on later levels.
///
/// Source ids that do not exist on the preceding level are dropped. The
/// result has one set per catalog level; the last is always empty.
pub fn upward_reach(catalog: &Catalog, manual: &[BTreeSet<String>]) -> Vec<BTreeSet<String>> {
    let mut up: Vec<BTreeSet<String>> = vec![BTreeSet::new(); catalog.len()];

    for level in (0..catalog.len().saturating_sub(1)).rev() {
        let mut reached = BTreeSet::new();
        for id in manual_at(manual, level + 1).chain(up[level + 1].iter()) {
            for parent in catalog.parents_of(level + 1, id) {
                if catalog.contains(level, parent) {
                    reached.insert(parent.clone());
                }
            }
        }
        up[level] = reached;
    }

    up
}

// ============================================================================
// Derived selection
// ============================================================================

/// Derived auto-selection for every level.
///
/// Each set excludes the level's own manual selection.
pub fn derive_auto_selection(catalog: &Catalog, selection: &SelectionState) -> Vec<BTreeSet<String>> {
    let manual = selection.all();
    let down = downward_reach(catalog, manual);
    let up = upward_reach(catalog, manual);

    let derived: Vec<BTreeSet<String>> = down
        .into_iter()
        .zip(up)
        .enumerate()
        .map(|(level, (mut reached, upward))| {
            reached.extend(upward);
            if let Some(own) = manual.get(level) {
                reached.retain(|id| !own.contains(id));
            }
            reached
        })
        .collect();

    trace!(
        sizes = ?derived.iter().map(BTreeSet::len).collect::<Vec<_>>(),
        "derived auto-selection"
    );
    derived
}

/// Derived auto-selection for a single level.
pub fn auto_selected(
    catalog: &Catalog,
    selection: &SelectionState,
    level: usize,
) -> Result<BTreeSet<String>> {
    if level >= catalog.len() {
        return Err(CascadeError::UnknownLevel(level));
    }
    Ok(derive_auto_selection(catalog, selection).swap_remove(level))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Level, demo_levels};

    /// Helper: demo catalog plus an empty selection
    fn setup() -> (Catalog, SelectionState) {
        let catalog = Catalog::new(demo_levels()).unwrap();
        let selection = SelectionState::for_catalog(&catalog);
        (catalog, selection)
    }

    fn ids(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_selection_derives_nothing() {
        let (catalog, selection) = setup();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(derived.len(), 3);
        assert!(derived.iter().all(BTreeSet::is_empty));
    }

    #[test]
    fn test_a_selects_children_in_b() {
        let (catalog, mut selection) = setup();
        selection.set(0, ["a0"]).unwrap();
        let auto_b = auto_selected(&catalog, &selection, 1).unwrap();
        assert_eq!(ids(&auto_b), vec!["b0", "b1"]);
    }

    #[test]
    fn test_a_selects_grandchildren_in_c() {
        let (catalog, mut selection) = setup();
        selection.set(0, ["a0"]).unwrap();
        let auto_c = auto_selected(&catalog, &selection, 2).unwrap();
        // b0 -> c0, c1; b1 -> c1, c2
        assert_eq!(ids(&auto_c), vec!["c0", "c1", "c2"]);
    }

    #[test]
    fn test_b_selects_children_and_parents() {
        let (catalog, mut selection) = setup();
        selection.set(1, ["b0"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[0]), vec!["a0"]);
        assert!(derived[1].is_empty());
        assert_eq!(ids(&derived[2]), vec!["c0", "c1"]);
    }

    #[test]
    fn test_b_with_multiple_sources() {
        let (catalog, mut selection) = setup();
        selection.set(1, ["b1"]).unwrap();
        let auto_a = auto_selected(&catalog, &selection, 0).unwrap();
        assert_eq!(ids(&auto_a), vec!["a0", "a1"]);
    }

    #[test]
    fn test_c_selects_parents_and_grandparents() {
        let (catalog, mut selection) = setup();
        selection.set(2, ["c1"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[1]), vec!["b0", "b1"]);
        assert_eq!(ids(&derived[0]), vec!["a0", "a1"]);
        assert!(derived[2].is_empty());
    }

    #[test]
    fn test_manual_excluded_from_own_level() {
        let (catalog, mut selection) = setup();
        selection.set(0, ["a0"]).unwrap();
        selection.set(1, ["b0"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        // b0 implies a0, which is manual
        assert!(derived[0].is_empty());
        // a0 implies b0 (manual) and b1
        assert_eq!(ids(&derived[1]), vec!["b1"]);
    }

    #[test]
    fn test_manual_still_propagates_past_own_level() {
        let (catalog, mut selection) = setup();
        // a1 implies b1, b2; b1 is also manual and must still reach c1, c2
        selection.set(0, ["a1"]).unwrap();
        selection.set(1, ["b1"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[1]), vec!["b2"]);
        assert_eq!(ids(&derived[2]), vec!["c1", "c2"]);
        assert_eq!(ids(&derived[0]), vec!["a0"]);
    }

    #[test]
    fn test_mixed_a_and_c() {
        let (catalog, mut selection) = setup();
        selection.set(0, ["a1"]).unwrap();
        selection.set(2, ["c2"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        // c2 -> b1{a0,a1}, b2{a1,a2}; a1 is manual
        assert_eq!(ids(&derived[0]), vec!["a0", "a2"]);
        assert_eq!(ids(&derived[1]), vec!["b1", "b2"]);
        assert_eq!(ids(&derived[2]), vec!["c1"]);
    }

    #[test]
    fn test_unknown_manual_ids_ignored() {
        let (catalog, mut selection) = setup();
        selection.set(1, ["ghost"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert!(derived.iter().all(BTreeSet::is_empty));
    }

    #[test]
    fn test_dangling_sources_skipped() {
        let catalog = Catalog::new(vec![
            Level::new("a", vec![Item::new("a0", "a0")]),
            Level::new("b", vec![Item::new("b0", "b0").with_sources(["a0", "missing"])]),
        ])
        .unwrap();
        let mut selection = SelectionState::for_catalog(&catalog);
        selection.set(1, ["b0"]).unwrap();

        let auto_a = auto_selected(&catalog, &selection, 0).unwrap();
        assert_eq!(ids(&auto_a), vec!["a0"]);
    }

    #[test]
    fn test_items_without_sources_only_propagate_down() {
        let catalog = Catalog::new(vec![
            Level::new("a", vec![Item::new("a0", "a0")]),
            Level::new(
                "b",
                vec![Item::new("orphan", "orphan"), Item::new("b1", "b1").with_sources(["a0"])],
            ),
            Level::new("c", vec![Item::new("c0", "c0").with_sources(["orphan"])]),
        ])
        .unwrap();
        let mut selection = SelectionState::for_catalog(&catalog);

        selection.set(1, ["orphan"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert!(derived[0].is_empty());
        assert_eq!(ids(&derived[2]), vec!["c0"]);

        selection.reset_all();
        selection.set(0, ["a0"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[1]), vec!["b1"]);
        assert!(derived[2].is_empty());
    }

    #[test]
    fn test_shared_ids_across_levels_not_conflated() {
        let catalog = Catalog::new(vec![
            Level::new("a", vec![Item::new("x", "ax"), Item::new("y", "ay")]),
            Level::new("b", vec![Item::new("x", "bx").with_sources(["y"])]),
        ])
        .unwrap();
        let mut selection = SelectionState::for_catalog(&catalog);
        selection.set(0, ["x"]).unwrap();

        let derived = derive_auto_selection(&catalog, &selection);
        // a/x has no children; b/x is a child of a/y only
        assert!(derived[1].is_empty());
    }

    #[test]
    fn test_four_level_chain() {
        let catalog = Catalog::new(vec![
            Level::new("l0", vec![Item::new("p", "p")]),
            Level::new("l1", vec![Item::new("q", "q").with_sources(["p"])]),
            Level::new("l2", vec![Item::new("r", "r").with_sources(["q"])]),
            Level::new("l3", vec![Item::new("s", "s").with_sources(["r"])]),
        ])
        .unwrap();
        let mut selection = SelectionState::for_catalog(&catalog);

        selection.set(0, ["p"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[3]), vec!["s"]);

        selection.reset_all();
        selection.set(3, ["s"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(ids(&derived[0]), vec!["p"]);
        assert_eq!(ids(&derived[1]), vec!["q"]);
        assert_eq!(ids(&derived[2]), vec!["r"]);
    }

    #[test]
    fn test_single_level_catalog() {
        let catalog = Catalog::new(vec![Level::new("only", vec![Item::new("x", "x")])]).unwrap();
        let mut selection = SelectionState::for_catalog(&catalog);
        selection.set(0, ["x"]).unwrap();
        let derived = derive_auto_selection(&catalog, &selection);
        assert_eq!(derived.len(), 1);
        assert!(derived[0].is_empty());
    }

    #[test]
    fn test_auto_selected_unknown_level() {
        let (catalog, selection) = setup();
        assert!(matches!(
            auto_selected(&catalog, &selection, 5),
            Err(CascadeError::UnknownLevel(5))
        ));
    }
}
