//! Small type-safe enums shared by the core and the adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How an item appears to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionMark {
    /// Not selected, not implied.
    #[default]
    None,
    /// Implied by a manual selection on another level.
    Auto,
    /// Explicitly selected by the user.
    Manual,
}

impl SelectionMark {
    /// Checkbox glyph used by text output and the terminal picker.
    pub fn checkbox(&self) -> &'static str {
        match self {
            Self::None => "[ ]",
            Self::Auto => "[~]",
            Self::Manual => "[x]",
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Output format of the `resolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
