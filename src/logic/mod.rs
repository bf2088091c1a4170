//! Logic modules: pure computations over the catalog and selection state.
//!
//! # Modules
//!
//! - `propagation` - cross-level auto-selection (downward to children,
//!   upward to sources)

pub mod propagation;
