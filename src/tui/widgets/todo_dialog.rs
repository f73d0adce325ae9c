use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::{App, EditorField, EditorMode, EditorState};
use crate::tui::input_handler::TextField;
use crate::tui::ui::centered_rect;

/// Modal add/edit form with a title and a description field
pub fn render_todo_dialog(frame: &mut Frame, app: &App, editor: &EditorState) {
    let width = 60.min(frame.area().width.saturating_sub(4));
    let area = centered_rect(width, 11, frame.area());

    let heading = match editor.mode {
        EditorMode::Add => " Add Todo ",
        EditorMode::Edit { .. } => " Edit Todo ",
    };
    let block = Block::default()
        .title(heading)
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(app.theme.popup);

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let field_width = inner.width.saturating_sub(4) as usize;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut text = vec![
        Line::from(""),
        label_line(app, "Title", editor.focus == EditorField::Title),
        field_line(app, &editor.title, editor.focus == EditorField::Title, field_width),
        label_line(app, "Description", editor.focus == EditorField::Description),
        field_line(
            app,
            &editor.description,
            editor.focus == EditorField::Description,
            field_width,
        ),
        Line::from(""),
    ];

    match &editor.error {
        Some(error) => text.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(error.clone(), app.theme.error),
        ])),
        None => text.push(Line::from("")),
    }

    text.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[Enter]", bold),
        Span::raw(" Save  "),
        Span::styled("[Tab]", bold),
        Span::raw(" Next field  "),
        Span::styled("[Esc]", bold),
        Span::raw(" Cancel"),
    ]));

    frame.render_widget(Paragraph::new(text), inner);
}

/// Small yes/no dialog
pub fn render_confirm_dialog(frame: &mut Frame, app: &App, message: &str) {
    let area = centered_rect(44, 7, frame.area());

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(app.theme.popup);

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {}", message))),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[y]", bold),
            Span::raw(" Yes  "),
            Span::styled("[n]", bold),
            Span::raw(" No"),
        ]),
    ];

    frame.render_widget(Paragraph::new(text), inner);
}

fn label_line(app: &App, label: &'static str, focused: bool) -> Line<'static> {
    let style = if focused {
        app.theme.accent.add_modifier(Modifier::BOLD)
    } else {
        app.theme.muted
    };
    Line::from(vec![Span::raw("  "), Span::styled(label, style)])
}

/// One field, scrolled so the cursor stays visible. Only the focused field
/// shows a cursor.
fn field_line(app: &App, field: &TextField, focused: bool, width: usize) -> Line<'static> {
    if !focused {
        let value: String = field.value().chars().take(width).collect();
        return Line::from(vec![Span::raw("  "), Span::styled(value, app.theme.text)]);
    }

    let (before, under, after) = field.split_at_cursor();

    // Keep the cursor inside the window by dropping leading characters
    let before_len = before.chars().count();
    let skip = (before_len + 1).saturating_sub(width);
    let before: String = before.chars().skip(skip).collect();
    let after: String = after
        .chars()
        .take(width.saturating_sub((before_len + 1).saturating_sub(skip)))
        .collect();

    Line::from(vec![
        Span::raw("  "),
        Span::styled(before, app.theme.text),
        Span::styled(under.to_string(), app.theme.cursor),
        Span::styled(after, app.theme.text),
    ])
}
