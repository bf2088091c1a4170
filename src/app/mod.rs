//! Application module
//!
//! The terminal picker: turns key events into selection mutations on a
//! [`MultiSelector`] and redraws after each one.
//!
//! # Module Structure
//! - `state` - Cursor/focus state types (AppState, AppMode)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{CascadeError, Result};
use crate::selector::MultiSelector;
use crate::ui;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    selector: MultiSelector,
    state: AppState,
    /// Keybinding context for key resolution and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance
    pub fn new(selector: MultiSelector) -> Self {
        info!("Creating new App instance");
        let state = AppState::new(selector.level_count());
        Self {
            selector,
            state,
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn selector(&self) -> &MultiSelector {
        &self.selector
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Main loop: draw, wait for input, apply it. Returns when the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| ui::render(f, self))?;

            let ready = crossterm::event::poll(Duration::from_millis(100))
                .map_err(|e| CascadeError::terminal(format!("Failed to poll input: {}", e)))?;
            if !ready {
                continue;
            }
            let event = crossterm::event::read()
                .map_err(|e| CascadeError::terminal(format!("Failed to read input: {}", e)))?;
            match event {
                // Windows reports releases too
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if self.handle_key_event(key_event) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle a key event. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        match self
            .keybinding_context
            .action_for(&self.state.mode, &key_event)
        {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Apply an action. Returns `true` when the user asked to quit.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        let item_count = self.focused_items_len();
        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.state.mode = AppMode::Help,
            KeyAction::Dismiss => self.state.mode = AppMode::Picker,
            KeyAction::NavigateUp => self.state.move_cursor(-1, item_count),
            KeyAction::NavigateDown => self.state.move_cursor(1, item_count),
            KeyAction::Home => self.state.set_cursor(0),
            KeyAction::End => self.state.set_cursor(item_count.saturating_sub(1)),
            KeyAction::NextLevel => self.state.focus_next(),
            KeyAction::PreviousLevel => self.state.focus_previous(),
            KeyAction::Toggle => self.toggle_current(),
            KeyAction::ResetLevel => self.reset_focused(),
            KeyAction::ResetAll => {
                self.selector.reset_all();
                self.state.status_message = "Cleared all levels".to_string();
            }
        }
        false
    }

    fn focused_items_len(&self) -> usize {
        self.selector
            .catalog_level(self.state.focused_level)
            .map(<[_]>::len)
            .unwrap_or(0)
    }

    /// Id of the item under the cursor in the focused column
    pub fn current_item_id(&self) -> Option<&str> {
        self.selector
            .catalog_level(self.state.focused_level)
            .ok()?
            .get(self.state.cursor())
            .map(|item| item.id.as_str())
    }

    fn toggle_current(&mut self) {
        let Some(id) = self.current_item_id().map(str::to_string) else {
            return;
        };
        match self.selector.toggle_selection(self.state.focused_level, &id) {
            Ok(true) => self.state.status_message = format!("Selected {}", id),
            Ok(false) => self.state.status_message = format!("Deselected {}", id),
            Err(e) => {
                warn!("Toggle failed: {}", e);
                self.state.status_message = format!("Error: {}", e);
            }
        }
    }

    fn reset_focused(&mut self) {
        let level = self.state.focused_level;
        match self.selector.reset(level) {
            Ok(()) => {
                let name = self
                    .selector
                    .catalog()
                    .level(level)
                    .map(|l| l.display_title().to_string())
                    .unwrap_or_default();
                self.state.status_message = format!("Cleared level {}", name);
            }
            Err(e) => {
                warn!("Reset failed: {}", e);
                self.state.status_message = format!("Error: {}", e);
            }
        }
    }
}
