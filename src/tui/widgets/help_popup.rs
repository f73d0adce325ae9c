use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("g", "Go to top"),
            ("G", "Go to bottom"),
            ("l/→", "Next page"),
            ("h/←", "Previous page"),
        ],
    ),
    (
        "Todos",
        &[
            ("a", "Add todo"),
            ("e/Enter", "Edit todo"),
            ("space/c", "Toggle completed"),
            ("d", "Delete todo"),
            ("x", "Clear completed"),
        ],
    ),
    (
        "View",
        &[
            ("f", "Cycle filter"),
            ("1 2 3", "All / Active / Completed"),
            ("T", "Cycle theme"),
            ("q/Esc", "Quit"),
        ],
    ),
];

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 26, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(app.theme.popup);

    let key_style = app.theme.accent.add_modifier(Modifier::BOLD);
    let section_style = app.theme.text.add_modifier(Modifier::BOLD);

    let mut text = Vec::new();
    for (section, keys) in SECTIONS {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(format!("  {}", section), section_style)));
        for (key, desc) in keys {
            text.push(Line::from(vec![
                Span::styled(format!("    {:<10}", key), key_style),
                Span::styled(*desc, app.theme.muted),
            ]));
        }
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "        Press Esc or ? to close",
        app.theme.muted,
    )));

    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text), inner);
}
