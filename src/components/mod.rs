//! Reusable terminal UI components
//!
//! - `keybindings` - mode-aware key registry, nav bar and help content
//! - `help_overlay` - centered help window

pub mod help_overlay;
pub mod keybindings;
