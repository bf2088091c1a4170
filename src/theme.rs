//! Centralized theme and styling for the terminal picker
//!
//! Single source of truth for colors and styles so that columns, the nav
//! bar and the help overlay stay visually consistent.
//!
//! # Usage
//! ```rust
//! use cascade_select::theme::{Colors, Styles, Theme};
//! use cascade_select::types::SelectionMark;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let auto_style = Theme::mark_style(SelectionMark::Auto);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::SelectionMark;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for emphasis
    pub const SECONDARY: Color = Color::Yellow;

    /// Manually selected items
    pub const MANUAL: Color = Color::Green;

    /// Auto-selected items
    pub const AUTO: Color = Color::LightBlue;

    /// Source lists next to item labels
    pub const SOURCES: Color = Color::DarkGray;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Cursor row highlight
    pub const CURSOR_BG: Color = Color::Yellow;

    /// Cursor row text (for contrast on yellow bg)
    pub const CURSOR_FG: Color = Color::Black;

    /// Error feedback
    pub const ERROR: Color = Color::Red;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Column and overlay titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Row under the cursor in the focused column
    pub fn cursor() -> Style {
        Style::default()
            .fg(Colors::CURSOR_FG)
            .bg(Colors::CURSOR_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn sources() -> Style {
        Style::default().fg(Colors::SOURCES)
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }
}

// =============================================================================
// SEMANTIC STYLES
// =============================================================================

pub struct Theme;

impl Theme {
    /// Style for an item label by its selection mark.
    ///
    /// Auto-selected items are bold, as in the browser demo.
    pub fn mark_style(mark: SelectionMark) -> Style {
        match mark {
            SelectionMark::Manual => Style::default().fg(Colors::MANUAL),
            SelectionMark::Auto => Style::default()
                .fg(Colors::AUTO)
                .add_modifier(Modifier::BOLD),
            SelectionMark::None => Style::default().fg(Colors::FG_SECONDARY),
        }
    }

    pub fn border_style(focused: bool) -> Style {
        if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        }
    }
}

/// Layout constants
pub struct UiConstants;

impl UiConstants {
    /// Help overlay width as percentage of screen
    pub const HELP_WIDTH_PCT: u16 = 60;

    /// Help overlay height as percentage of screen
    pub const HELP_HEIGHT_PCT: u16 = 70;

    /// Minimum column width before columns stack vertically
    pub const MIN_COLUMN_WIDTH: u16 = 24;
}
