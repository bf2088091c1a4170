//! cascade-select library
//!
//! A multi-level multi-select: items on each level name their parents on
//! the level above, and picking items on one level automatically selects
//! the related items on every other level.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod error;
pub mod logic;
pub mod report;
pub mod selection;
pub mod selector;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{Catalog, DataIntegrityWarning, Item, Level, demo_levels};
pub use config_file::{CatalogFile, load_catalog};
pub use error::{CascadeError, CatalogError};
pub use logic::propagation::{auto_selected, derive_auto_selection};
pub use selection::SelectionState;
pub use selector::{ItemView, LevelView, MultiSelector, SelectionSnapshot, SharedSelector};
pub use types::{OutputFormat, SelectionMark};
