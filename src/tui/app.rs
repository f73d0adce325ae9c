use std::time::{Duration, Instant};

use crate::error::Result;
use crate::filter::Filter;
use crate::models::Todo;
use crate::pagination::Paginator;
use crate::store::{Outcome, Stats};
use crate::theme::{Theme, ThemeController};
use crate::ticklist::Ticklist;

use super::input_handler::TextField;
use super::theme::TuiTheme;

/// Main application state
pub struct App {
    /// Store, config and data directory shared with the CLI
    pub ticklist: Ticklist,
    pub theme_controller: ThemeController,
    /// Styles resolved from the current theme
    pub theme: TuiTheme,
    pub filter: Filter,
    pub pager: Paginator,
    /// Selected row within the current page
    pub selected: usize,
    /// Active popup/dialog state
    pub popup: Option<Popup>,
    /// Status message (success/error feedback)
    pub status_message: Option<StatusMessage>,
    /// Application running flag
    pub running: bool,
}

#[derive(Debug, Clone)]
pub enum Popup {
    Help,
    Editor(EditorState),
    ConfirmClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Description,
}

/// Add/edit dialog contents
#[derive(Debug, Clone)]
pub struct EditorState {
    pub mode: EditorMode,
    pub title: TextField,
    pub description: TextField,
    pub focus: EditorField,
    /// Inline validation message
    pub error: Option<String>,
}

impl EditorState {
    pub fn add() -> Self {
        Self {
            mode: EditorMode::Add,
            title: TextField::default(),
            description: TextField::default(),
            focus: EditorField::Title,
            error: None,
        }
    }

    pub fn edit(todo: &Todo) -> Self {
        Self {
            mode: EditorMode::Edit {
                id: todo.id.clone(),
            },
            title: TextField::with_value(&todo.title),
            description: TextField::with_value(todo.description.as_deref().unwrap_or_default()),
            focus: EditorField::Title,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            EditorField::Title => &mut self.title,
            EditorField::Description => &mut self.description,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            EditorField::Title => EditorField::Description,
            EditorField::Description => EditorField::Title,
        };
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl App {
    pub fn with_ticklist(ticklist: Ticklist) -> Self {
        let config = ticklist.config();
        let theme_controller = ThemeController::new(config.theme);
        let theme = TuiTheme::from(&theme_controller.colors());
        let filter = config.default_filter;

        Self {
            ticklist,
            theme_controller,
            theme,
            filter,
            pager: Paginator::default(),
            selected: 0,
            popup: None,
            status_message: None,
            running: true,
        }
    }

    /// Todos passing the current filter, in insertion order.
    pub fn visible(&self) -> Vec<&Todo> {
        self.filter.apply(self.ticklist.store().todos())
    }

    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    /// Slice of [`App::visible`] on the current page.
    pub fn page_items(&self) -> Vec<&Todo> {
        let visible = self.visible();
        let range = self.pager.page_range(visible.len());
        visible[range].to_vec()
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.page_items().get(self.selected).copied()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_todo().map(|t| t.id.clone())
    }

    pub fn stats(&self) -> Stats {
        self.ticklist.store().stats()
    }

    pub fn theme_kind(&self) -> Theme {
        self.theme_controller.theme()
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.page_items().len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.page_items().len().saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        if self.pager.next_page(self.visible_count()) {
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.pager.prev_page() {
            self.selected = 0;
        }
    }

    /// Switching filters starts over on the first page.
    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.pager.first_page();
            self.selected = 0;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme_controller.toggle();
        self.theme = TuiTheme::from(&self.theme_controller.colors());
        theme
    }

    /// Pull the page and the selection back into range. Runs after every
    /// draw, so a shrinking list settles one frame after the change.
    pub fn reconcile(&mut self) {
        let count = self.visible_count();
        if self.pager.reconcile(count) {
            tracing::debug!(page = self.pager.current(), count, "page clamped");
        }
        let on_page = self.pager.page_range(count).len();
        if self.selected >= on_page {
            self.selected = on_page.saturating_sub(1);
        }
    }

    /// Run a store mutation, reporting a failed write in the status line.
    pub fn apply<F>(&mut self, mutate: F) -> Option<Outcome>
    where
        F: FnOnce(&mut Ticklist) -> Result<Outcome>,
    {
        match mutate(&mut self.ticklist) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                None
            }
        }
    }

    /// Set status message
    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Clear expired status messages
    pub fn tick(&mut self) {
        if let Some(ref msg) = self.status_message {
            if Instant::now() >= msg.expires_at {
                self.status_message = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
