//! Error handling module for cascade-select
//!
//! Provides centralized error types using thiserror. Library operations
//! return [`CascadeError`]; catalog construction failures are grouped under
//! [`CatalogError`].

use thiserror::Error;

/// Main error type for cascade-select
#[derive(Error, Debug)]
pub enum CascadeError {
    /// Toggle referenced an id that does not exist in the level's catalog
    #[error("Item '{id}' not found in level {level}")]
    NotFound { level: usize, id: String },

    /// Level index outside the catalog's range
    #[error("Unknown level index: {0}")]
    UnknownLevel(usize),

    /// Level name not present in the catalog
    #[error("Unknown level name: {0}")]
    UnknownLevelName(String),

    /// Catalog construction errors (duplicate ids, empty catalog)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (command line values, catalog files)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// State errors (mutex poisoning)
    #[error("State error: {0}")]
    State(String),
}

/// Result type alias for cascade-select operations
pub type Result<T> = std::result::Result<T, CascadeError>;

impl CascadeError {
    /// Create a not-found error for `id` in `level`
    pub fn not_found(level: usize, id: impl Into<String>) -> Self {
        Self::NotFound {
            level,
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}

/// Hard failures while building a [`Catalog`](crate::catalog::Catalog).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no levels")]
    Empty,

    #[error("duplicate level name '{0}'")]
    DuplicateLevel(String),

    #[error("duplicate item id '{id}' in level '{level}'")]
    DuplicateItem { level: String, id: String },
}
