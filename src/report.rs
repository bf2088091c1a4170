//! Headless resolution: apply command-line selections and format the result.

use std::fmt::Write as _;

use tracing::debug;

use crate::cli::LevelSelection;
use crate::error::Result;
use crate::selector::{MultiSelector, SelectionSnapshot};
use crate::types::OutputFormat;

/// Apply each `LEVEL=IDS` argument with `set` semantics.
///
/// A later argument for the same level replaces the earlier one. Unknown
/// level names fail; unknown ids are stored and match nothing.
pub fn apply_selections(selector: &mut MultiSelector, selections: &[LevelSelection]) -> Result<()> {
    for sel in selections {
        let level = selector.level_index(&sel.level)?;
        for id in &sel.ids {
            if !selector.catalog().contains(level, id) {
                debug!(level = %sel.level, id = %id, "selected id not in catalog");
            }
        }
        selector.set_selection(level, sel.ids.iter().cloned())?;
    }
    Ok(())
}

/// Format a snapshot for output.
pub fn render(snapshot: &SelectionSnapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

/// One block per level: manual and auto lists followed by the items with
/// their checkbox marks.
pub fn render_text(snapshot: &SelectionSnapshot) -> String {
    let mut out = String::new();
    for (i, level) in snapshot.levels.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} ({})", level.title, level.name);
        let _ = writeln!(out, "  manual: [{}]", level.manual.join(", "));
        let _ = writeln!(out, "  auto:   [{}]", level.auto.join(", "));
        for item in &level.items {
            let _ = write!(out, "  {} {} {}", item.mark.checkbox(), item.id, item.label);
            if !item.sources.is_empty() {
                let _ = write!(out, " <- {}", item.sources.join(", "));
            }
            out.push('\n');
        }
    }
    out
}
