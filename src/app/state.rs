//! Application state definitions
//!
//! Cursor and focus bookkeeping for the terminal picker. Selection data
//! lives in the [`MultiSelector`](crate::selector::MultiSelector), not here.

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Level columns with checkboxes
    Picker,
    /// Help overlay on top of the picker
    Help,
}

/// Picker state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Index of the focused level column
    pub focused_level: usize,
    /// Cursor row per level
    pub cursors: Vec<usize>,
    /// Status message for user feedback
    pub status_message: String,
}

impl AppState {
    /// State for a catalog with `level_count` levels
    pub fn new(level_count: usize) -> Self {
        Self {
            mode: AppMode::Picker,
            focused_level: 0,
            cursors: vec![0; level_count],
            status_message: "Space toggles, ? for help".to_string(),
        }
    }

    /// Cursor row in the focused column
    pub fn cursor(&self) -> usize {
        self.cursors.get(self.focused_level).copied().unwrap_or(0)
    }

    pub fn focus_next(&mut self) {
        if !self.cursors.is_empty() {
            self.focused_level = (self.focused_level + 1) % self.cursors.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.cursors.is_empty() {
            self.focused_level = self
                .focused_level
                .checked_sub(1)
                .unwrap_or(self.cursors.len() - 1);
        }
    }

    /// Move the focused cursor by `delta`, clamped to `0..item_count`
    pub fn move_cursor(&mut self, delta: isize, item_count: usize) {
        if let Some(cursor) = self.cursors.get_mut(self.focused_level) {
            let max = item_count.saturating_sub(1);
            *cursor = cursor.saturating_add_signed(delta).min(max);
        }
    }

    pub fn set_cursor(&mut self, row: usize) {
        if let Some(cursor) = self.cursors.get_mut(self.focused_level) {
            *cursor = row;
        }
    }
}
