use ratatui::style::{Color, Modifier, Style};

use crate::theme::{Rgb, ThemeColors};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    /// Background and default text for the whole screen
    pub base: Style,
    pub text: Style,
    pub muted: Style,
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub selected: Style,
    pub border: Style,
    pub title: Style,
    pub completed_text: Style,
    pub active_tab: Style,
    pub cursor: Style,
    /// Background for dialogs drawn over the list
    pub popup: Style,
}

impl From<&ThemeColors> for TuiTheme {
    fn from(colors: &ThemeColors) -> Self {
        let background = color(colors.background);
        Self {
            base: Style::default().bg(background).fg(color(colors.text)),
            text: Style::default().fg(color(colors.text)),
            muted: Style::default().fg(color(colors.muted)),
            accent: Style::default().fg(color(colors.accent)),
            success: Style::default().fg(color(colors.success)),
            error: Style::default().fg(color(colors.error)),
            selected: Style::default()
                .bg(color(colors.selection))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(color(colors.border)),
            title: Style::default()
                .fg(color(colors.accent))
                .add_modifier(Modifier::BOLD),
            // Completed todo text - muted with strikethrough
            completed_text: Style::default()
                .fg(color(colors.muted))
                .add_modifier(Modifier::CROSSED_OUT),
            active_tab: Style::default()
                .fg(background)
                .bg(color(colors.accent))
                .add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(background).bg(color(colors.text)),
            popup: Style::default().bg(color(colors.selection)).fg(color(colors.text)),
        }
    }
}
