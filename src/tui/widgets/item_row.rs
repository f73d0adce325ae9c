use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::Todo;
use crate::tui::app::App;

/// Cells left of the title: selection marker and checkbox.
const PREFIX_WIDTH: usize = 6;

/// Render a single todo as a Line: checkbox, title, description preview and
/// creation stamp, cut to fit `width` cells.
pub fn render_todo_line(app: &App, todo: &Todo, is_selected: bool, width: usize) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();

    let marker = if is_selected { " > " } else { "   " };
    spans.push(Span::styled(marker, app.theme.accent));

    let (checkbox, checkbox_style) = if todo.completed {
        ("✔", app.theme.success)
    } else {
        ("☐", app.theme.muted)
    };
    spans.push(Span::styled(format!("{}  ", checkbox), checkbox_style));

    // The stamp is dropped first when the title would not fit beside it
    let stamp = todo.created().map(|c| format!("  {}", c)).unwrap_or_default();
    let available = width.saturating_sub(PREFIX_WIDTH);
    let show_stamp = todo.title.width() + stamp.width() <= available;
    let room = if show_stamp {
        available - stamp.width()
    } else {
        available
    };

    let title = truncate_to_width(&todo.title, room);
    let room = room.saturating_sub(title.width());
    let title_style = if todo.completed {
        app.theme.completed_text
    } else {
        app.theme.text
    };
    spans.push(Span::styled(title, title_style));

    if let Some(description) = todo.description.as_deref() {
        let preview = truncate_to_width(&format!("  {}", first_line(description)), room);
        if preview.width() > 2 {
            spans.push(Span::styled(preview, app.theme.muted));
        }
    }

    if show_stamp && !stamp.is_empty() {
        spans.push(Span::styled(stamp, app.theme.muted));
    }

    let mut line = Line::from(spans);
    if is_selected {
        line = line.style(app.theme.selected);
    }
    line
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Cut `text` to at most `max_cells` terminal cells, ending in `…` when
/// anything was dropped.
pub fn truncate_to_width(text: &str, max_cells: usize) -> String {
    if text.width() <= max_cells {
        return text.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
