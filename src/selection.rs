//! Manual selection state
//!
//! One ordered id set per catalog level. Only explicit user actions mutate
//! it; propagation reads it and never writes back.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CascadeError, Result};

/// Per-level sets of manually selected item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    levels: Vec<BTreeSet<String>>,
}

impl SelectionState {
    /// Empty selection for `level_count` levels.
    pub fn new(level_count: usize) -> Self {
        Self {
            levels: vec![BTreeSet::new(); level_count],
        }
    }

    /// Empty selection sized for `catalog`.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.len())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Current manual selection of `level`.
    pub fn get(&self, level: usize) -> Result<&BTreeSet<String>> {
        self.levels
            .get(level)
            .ok_or(CascadeError::UnknownLevel(level))
    }

    /// All levels, in catalog order.
    pub fn all(&self) -> &[BTreeSet<String>] {
        &self.levels
    }

    pub fn contains(&self, level: usize, id: &str) -> bool {
        self.levels.get(level).is_some_and(|set| set.contains(id))
    }

    /// Flip membership of `id` on `level`.
    ///
    /// Returns `true` if the item is selected afterwards. Fails with
    /// `NotFound` when `id` is not in the level's catalog; state is left
    /// untouched in that case.
    pub fn toggle(&mut self, catalog: &Catalog, level: usize, id: &str) -> Result<bool> {
        let set = self
            .levels
            .get_mut(level)
            .ok_or(CascadeError::UnknownLevel(level))?;
        if !catalog.contains(level, id) {
            return Err(CascadeError::not_found(level, id));
        }

        let selected = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };
        debug!(level, id, selected, "toggled selection");
        Ok(selected)
    }

    /// Replace the selection of `level` wholesale.
    ///
    /// Ids are not validated; unknown ids are kept and never match anything
    /// during propagation.
    pub fn set<I, S>(&mut self, level: usize, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self
            .levels
            .get_mut(level)
            .ok_or(CascadeError::UnknownLevel(level))?;
        *set = ids.into_iter().map(Into::into).collect();
        debug!(level, count = set.len(), "replaced selection");
        Ok(())
    }

    /// Clear the selection of `level`.
    pub fn reset(&mut self, level: usize) -> Result<()> {
        self.levels
            .get_mut(level)
            .ok_or(CascadeError::UnknownLevel(level))?
            .clear();
        Ok(())
    }

    /// Clear every level.
    pub fn reset_all(&mut self) {
        for set in &mut self.levels {
            set.clear();
        }
    }

    /// True when no level has a manual selection.
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(BTreeSet::is_empty)
    }
}
