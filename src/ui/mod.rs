//! User interface rendering
//!
//! One bordered column per catalog level, side by side, with a status line
//! and a navigation bar underneath. Columns stack vertically when the
//! terminal is too narrow for them.

use crate::app::{App, AppMode};
use crate::catalog::Level;
use crate::components::help_overlay::HelpOverlay;
use crate::selector::MultiSelector;
use crate::theme::{Styles, Theme, UiConstants};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Draw the whole picker
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(f, chunks[0], app.selector());
    render_columns(f, chunks[1], app);
    render_status(f, chunks[2], &app.state().status_message);
    render_nav_bar(f, chunks[3], app);

    if app.state().mode == AppMode::Help {
        HelpOverlay::new(&AppMode::Picker, app.keybinding_context()).render(f, area);
    }
}

fn render_title(f: &mut Frame, area: Rect, selector: &MultiSelector) {
    let manual: usize = selector.selection().all().iter().map(|s| s.len()).sum();
    let auto: usize = selector.derived().iter().map(|s| s.len()).sum();
    let line = Line::from(vec![
        Span::styled(" cascade-select ", Styles::title()),
        Span::styled(
            format!(" {} selected, {} implied", manual, auto),
            Styles::text_muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_columns(f: &mut Frame, area: Rect, app: &App) {
    let levels = app.selector().catalog().levels();
    if levels.is_empty() {
        return;
    }

    let count = levels.len() as u32;
    let direction = if area.width / (count as u16).max(1) >= UiConstants::MIN_COLUMN_WIDTH {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let columns = Layout::default()
        .direction(direction)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (i, level) in levels.iter().enumerate() {
        render_level(f, columns[i], app, i, level);
    }
}

fn render_level(f: &mut Frame, area: Rect, app: &App, index: usize, level: &Level) {
    let selector = app.selector();
    let state = app.state();
    let focused = state.focused_level == index;

    let manual = selector.manual_selection(index).map(|s| s.len()).unwrap_or(0);
    let auto = selector.auto_selection(index).map(|s| s.len()).unwrap_or(0);
    let block = Block::default()
        .title(format!(" {} ({} + {} auto) ", level.display_title(), manual, auto))
        .borders(Borders::ALL)
        .border_style(Theme::border_style(focused));

    let cursor = state.cursors.get(index).copied().unwrap_or(0);
    let lines: Vec<Line> = level
        .items
        .iter()
        .enumerate()
        .map(|(row, item)| {
            let mark = selector.mark(index, &item.id);
            let mut spans = vec![
                Span::styled(format!("{} ", mark.checkbox()), Theme::mark_style(mark)),
                Span::styled(item.label.clone(), Theme::mark_style(mark)),
            ];
            if level.show_sources && !item.sources.is_empty() {
                spans.push(Span::styled(
                    format!(" [{}]", item.sources.join(", ")),
                    Styles::sources(),
                ));
            }
            let line = Line::from(spans);
            if focused && row == cursor {
                line.style(Styles::cursor())
            } else {
                line
            }
        })
        .collect();

    // Keep the cursor row visible
    let inner_height = area.height.saturating_sub(2) as usize;
    let offset = cursor.saturating_sub(inner_height.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    f.render_widget(widget, area);
}

fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let style = if message.starts_with("Error") {
        Styles::error()
    } else {
        Styles::text()
    };
    f.render_widget(Paragraph::new(Span::styled(format!(" {}", message), style)), area);
}

fn render_nav_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for item in app.keybinding_context().get_nav_items(&app.state().mode) {
        spans.push(Span::styled(format!(" {} ", item.key_display), Styles::nav_key()));
        spans.push(Span::styled(format!("{}  ", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
