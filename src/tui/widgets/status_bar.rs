use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};

const KEYBINDINGS: [(&str, &str); 8] = [
    ("?", "Help"),
    ("a", "Add"),
    ("e", "Edit"),
    ("space", "Toggle"),
    ("d", "Delete"),
    ("f", "Filter"),
    ("T", "Theme"),
    ("q", "Quit"),
];

/// "Page x of y" line under the list
pub fn render_pagination_bar(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.visible_count();
    let total = app.pager.total_pages(count);
    let current = app.pager.current().min(total);

    let arrow = |enabled: bool, symbol: &'static str| {
        if enabled {
            Span::styled(symbol, app.theme.accent)
        } else {
            Span::styled(symbol, app.theme.muted)
        }
    };

    let line = Line::from(vec![
        arrow(current > 1, "◀ "),
        Span::styled(format!("Page {} of {}", current, total), app.theme.text),
        arrow(current < total, " ▶"),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Stats line or status message
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.success,
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.accent,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(msg.text.as_str(), style)]);
        frame.render_widget(Paragraph::new(line), chunks[0]);
    } else if app.ticklist.config().display_progress_overview {
        let stats = app.stats();
        let stats_line = Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{}%", stats.percent), app.theme.success),
            Span::styled(" done", app.theme.muted),
            Span::styled(" | ", app.theme.muted),
            Span::styled(format!("{}", stats.completed), app.theme.success),
            Span::styled(" completed", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", stats.active), app.theme.accent),
            Span::styled(" active", app.theme.muted),
            Span::styled(" · ", app.theme.muted),
            Span::styled(format!("{}", stats.total), app.theme.text),
            Span::styled(" total", app.theme.muted),
        ]);
        frame.render_widget(Paragraph::new(stats_line), chunks[0]);
    }

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in KEYBINDINGS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
