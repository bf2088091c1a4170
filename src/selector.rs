//! Multi-level selector session
//!
//! [`MultiSelector`] is the interface the presentation layer talks to: it
//! owns the catalog, the manual selection state and a memo of the derived
//! auto-selection. Every mutation clears the memo before returning, so reads
//! never observe derived sets from an older selection.
//!
//! [`SharedSelector`] wraps a session in `Arc<Mutex<_>>` for hosts that
//! touch it from more than one thread; mutation and recompute run under a
//! single lock.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, Item};
use crate::error::{CascadeError, Result};
use crate::logic::propagation::derive_auto_selection;
use crate::selection::SelectionState;
use crate::types::SelectionMark;

/// Catalog + manual selection + memoized derived selection.
#[derive(Debug, Clone)]
pub struct MultiSelector {
    catalog: Catalog,
    selection: SelectionState,
    derived: OnceCell<Vec<BTreeSet<String>>>,
}

impl MultiSelector {
    /// New session with an empty selection.
    pub fn new(catalog: Catalog) -> Self {
        info!(levels = catalog.len(), "creating selector session");
        let selection = SelectionState::for_catalog(&catalog);
        Self {
            catalog,
            selection,
            derived: OnceCell::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// Resolve a level name to its index.
    pub fn level_index(&self, name: &str) -> Result<usize> {
        self.catalog
            .level_index(name)
            .ok_or_else(|| CascadeError::UnknownLevelName(name.to_string()))
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Items of `level` in catalog order.
    pub fn catalog_level(&self, level: usize) -> Result<&[Item]> {
        self.catalog
            .items(level)
            .ok_or(CascadeError::UnknownLevel(level))
    }

    /// Manual selection of `level`.
    pub fn manual_selection(&self, level: usize) -> Result<&BTreeSet<String>> {
        self.selection.get(level)
    }

    /// Derived auto-selection of `level`, disjoint from its manual selection.
    pub fn auto_selection(&self, level: usize) -> Result<&BTreeSet<String>> {
        self.derived()
            .get(level)
            .ok_or(CascadeError::UnknownLevel(level))
    }

    /// Derived auto-selection of every level.
    pub fn derived(&self) -> &[BTreeSet<String>] {
        self.derived
            .get_or_init(|| derive_auto_selection(&self.catalog, &self.selection))
    }

    /// Display mark for `id` on `level`. Manual wins over auto.
    pub fn mark(&self, level: usize, id: &str) -> SelectionMark {
        if self.selection.contains(level, id) {
            SelectionMark::Manual
        } else if self.derived().get(level).is_some_and(|set| set.contains(id)) {
            SelectionMark::Auto
        } else {
            SelectionMark::None
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Flip `id` on `level`. Fails with `NotFound` for ids outside the
    /// level's catalog, leaving state unchanged.
    pub fn toggle_selection(&mut self, level: usize, id: &str) -> Result<bool> {
        let selected = self.selection.toggle(&self.catalog, level, id)?;
        self.invalidate();
        Ok(selected)
    }

    /// Replace the manual selection of `level`.
    pub fn set_selection<I, S>(&mut self, level: usize, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set(level, ids)?;
        self.invalidate();
        Ok(())
    }

    pub fn reset(&mut self, level: usize) -> Result<()> {
        self.selection.reset(level)?;
        self.invalidate();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.selection.reset_all();
        self.invalidate();
    }

    /// Drop the memoized derived sets; the next read recomputes them.
    pub fn invalidate(&mut self) {
        if self.derived.take().is_some() {
            debug!("derived selection invalidated");
        }
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    /// Serializable view of every level.
    pub fn snapshot(&self) -> SelectionSnapshot {
        let levels = self
            .catalog
            .levels()
            .iter()
            .enumerate()
            .map(|(i, level)| LevelView {
                name: level.name.clone(),
                title: level.display_title().to_string(),
                manual: self.selection.all()[i].iter().cloned().collect(),
                auto: self.derived()[i].iter().cloned().collect(),
                items: level
                    .items
                    .iter()
                    .map(|item| ItemView {
                        id: item.id.clone(),
                        label: item.label.clone(),
                        sources: item.sources.clone(),
                        mark: self.mark(i, &item.id),
                    })
                    .collect(),
            })
            .collect();
        SelectionSnapshot { levels }
    }
}

/// One item with its display mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    pub mark: SelectionMark,
}

/// One level as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub name: String,
    pub title: String,
    pub manual: Vec<String>,
    pub auto: Vec<String>,
    pub items: Vec<ItemView>,
}

/// All levels, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub levels: Vec<LevelView>,
}

// ============================================================================
// Shared session
// ============================================================================

/// Thread-safe handle to a [`MultiSelector`].
#[derive(Debug, Clone)]
pub struct SharedSelector {
    inner: Arc<Mutex<MultiSelector>>,
}

impl SharedSelector {
    pub fn new(selector: MultiSelector) -> Self {
        Self {
            inner: Arc::new(Mutex::new(selector)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MultiSelector>> {
        self.inner
            .lock()
            .map_err(|e| CascadeError::state(format!("Mutex poisoned: {}", e)))
    }

    /// Run a mutation and refresh the derived sets under one lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut MultiSelector) -> Result<T>) -> Result<T> {
        let mut selector = self.lock()?;
        let out = f(&mut selector)?;
        selector.derived();
        Ok(out)
    }

    /// Read under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&MultiSelector) -> T) -> Result<T> {
        let selector = self.lock()?;
        Ok(f(&selector))
    }

    pub fn snapshot(&self) -> Result<SelectionSnapshot> {
        self.read(MultiSelector::snapshot)
    }
}
