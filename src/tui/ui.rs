use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::filter::Filter;

use super::app::{App, Popup};
use super::widgets::{
    help_popup::render_help_popup,
    item_row::render_todo_line,
    status_bar::{render_pagination_bar, render_status_bar},
    todo_dialog::{render_confirm_dialog, render_todo_dialog},
};

pub const EMPTY_COLLECTION: &str = "No todos yet. Add one with 'a'.";
pub const EMPTY_FILTER: &str = "Nothing here.";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(app.theme.base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Pagination
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_pagination_bar(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if let Some(ref popup) = app.popup {
        match popup {
            Popup::Help => render_help_popup(frame, app),
            Popup::Editor(editor) => render_todo_dialog(frame, app, editor),
            Popup::ConfirmClear => {
                let count = app.stats().completed;
                render_confirm_dialog(
                    frame,
                    app,
                    &format!("Delete {} completed todo(s)?", count),
                );
            }
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("  ticklist", app.theme.title),
        Span::raw("  "),
    ];

    for filter in Filter::ALL {
        let style = if filter == app.filter {
            app.theme.active_tab
        } else {
            app.theme.muted
        };
        spans.push(Span::styled(format!(" {} ", filter), style));
        spans.push(Span::raw(" "));
    }

    let left = Line::from(spans);
    let right = Line::from(Span::styled(
        format!("{}  ", app.theme_kind().label()),
        app.theme.accent,
    ));

    frame.render_widget(Paragraph::new(left), area);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(app.theme.border);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = app.page_items();
    if items.is_empty() {
        let message = empty_message(app);
        let paragraph = Paragraph::new(message)
            .style(app.theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let width = inner.width as usize;
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, todo)| render_todo_line(app, todo, i == app.selected, width))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Empty-state text. An out-of-range page shows nothing until the next
/// reconcile pulls it back, so only a truly empty filter result counts.
fn empty_message(app: &App) -> &'static str {
    if app.ticklist.store().is_empty() {
        EMPTY_COLLECTION
    } else if app.visible_count() == 0 {
        EMPTY_FILTER
    } else {
        ""
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
