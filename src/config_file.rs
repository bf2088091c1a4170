//! Catalog file handling for saving and loading catalogs as JSON.
//!
//! ```json
//! {
//!   "levels": [
//!     { "name": "a", "items": [ { "id": "a0", "label": "Option a0" } ] },
//!     { "name": "b", "show_sources": true,
//!       "items": [ { "id": "b0", "label": "Option b0", "sources": ["a0"] } ] }
//!   ]
//! }
//! ```
//!
//! `value` is accepted as a synonym for `id`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::catalog::{Catalog, DataIntegrityWarning, Level, demo_levels};

/// Catalog as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub levels: Vec<Level>,
}

impl Default for CatalogFile {
    fn default() -> Self {
        Self::demo()
    }
}

impl CatalogFile {
    /// The built-in three-level demo catalog
    pub fn demo() -> Self {
        Self {
            levels: demo_levels(),
        }
    }

    /// Save catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        info!("Catalog saved to {:?}", path.as_ref());
        Ok(())
    }

    /// Load catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid catalog file {:?}", path.as_ref()))
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse catalog JSON")
    }

    /// Build the indexed catalog and report integrity warnings.
    ///
    /// Duplicate ids or level names fail; dangling sources are logged and
    /// returned alongside the catalog.
    pub fn build(self) -> Result<(Catalog, Vec<DataIntegrityWarning>)> {
        let catalog = Catalog::new(self.levels).context("Failed to build catalog")?;
        let warnings = catalog.validate();
        for warning in &warnings {
            warn!("Catalog integrity: {}", warning);
        }
        Ok((catalog, warnings))
    }

    /// Build the indexed catalog, logging and discarding warnings
    pub fn into_catalog(self) -> Result<Catalog> {
        self.build().map(|(catalog, _)| catalog)
    }
}

/// Load the catalog at `path`, or the demo catalog when no path is given
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            CatalogFile::load_from_file(path)?.into_catalog()
        }
        None => CatalogFile::demo().into_catalog(),
    }
}
