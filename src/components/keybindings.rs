//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings per application mode. Key events are
//! resolved to [`KeyAction`]s here, so the event loop never matches raw
//! key codes.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Home,
    End,
    NextLevel,
    PreviousLevel,
    Toggle,
    ResetLevel,
    ResetAll,
    Help,
    Dismiss,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
    /// Hidden bindings resolve keys but are not listed in help or nav bar
    pub hidden: bool,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
            hidden: false,
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            modifiers,
            ..Self::new(key, action, display, description)
        }
    }

    /// Alternative key for an action already listed under another binding
    pub fn alias(key: KeyCode, action: KeyAction) -> Self {
        Self {
            hidden: true,
            ..Self::new(key, action, "", "")
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Shift is ignored for character keys and BackTab since the code
    /// already carries it (`R` arrives as `Char('R')` with SHIFT set).
    fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        modifiers == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Picker,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous item"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next item"),
                Keybinding::alias(KeyCode::Char('k'), KeyAction::NavigateUp),
                Keybinding::alias(KeyCode::Char('j'), KeyAction::NavigateDown),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First item"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last item"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousLevel, "Left", "Previous level"),
                Keybinding::new(KeyCode::Right, KeyAction::NextLevel, "Right", "Next level"),
                Keybinding::alias(KeyCode::Tab, KeyAction::NextLevel),
                Keybinding::alias(KeyCode::BackTab, KeyAction::PreviousLevel),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle item"),
                Keybinding::alias(KeyCode::Enter, KeyAction::Toggle),
                Keybinding::new(KeyCode::Char('r'), KeyAction::ResetLevel, "r", "Reset level"),
                Keybinding::new(KeyCode::Char('R'), KeyAction::ResetAll, "R", "Reset all levels"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Help,
            vec![
                Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close help"),
                Keybinding::alias(KeyCode::Enter, KeyAction::Dismiss),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action in `mode`.
    ///
    /// Mode bindings take precedence over global ones; in help mode `?`
    /// closes the overlay.
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        let action = self
            .get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)?;

        if *mode == AppMode::Help && action == KeyAction::Help {
            return Some(KeyAction::Dismiss);
        }
        Some(action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Picker => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::PreviousLevel,
                KeyAction::NextLevel,
                KeyAction::Toggle,
                KeyAction::ResetLevel,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Help => vec![KeyAction::Dismiss, KeyAction::Quit],
        };

        // Combine Up/Down and Left/Right into single items
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_level = false;

        for action in priority_actions {
            match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => {
                    if !has_nav {
                        items.push(NavBarItem {
                            key_display: "Up/Dn".to_string(),
                            action_label: "Navigate".to_string(),
                        });
                        has_nav = true;
                    }
                }
                KeyAction::PreviousLevel | KeyAction::NextLevel => {
                    if !has_level {
                        items.push(NavBarItem {
                            key_display: "Lt/Rt".to_string(),
                            action_label: "Level".to_string(),
                        });
                        has_level = true;
                    }
                }
                _ => {
                    if let Some(binding) =
                        bindings.iter().find(|b| b.action == action && !b.hidden)
                    {
                        items.push(NavBarItem {
                            key_display: binding.display.clone(),
                            action_label: binding.description.clone(),
                        });
                    }
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let visible: Vec<&Keybinding> = self
            .get_bindings(mode)
            .into_iter()
            .filter(|b| !b.hidden)
            .collect();

        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::NextLevel
                        | KeyAction::PreviousLevel
                )
            }),
            ("Selection", |a| {
                matches!(
                    a,
                    KeyAction::Toggle | KeyAction::ResetLevel | KeyAction::ResetAll
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Help | KeyAction::Dismiss | KeyAction::Quit)
            }),
        ];

        groups
            .iter()
            .filter_map(|(title, in_group)| {
                let items: Vec<(String, String)> = visible
                    .iter()
                    .filter(|b| in_group(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
