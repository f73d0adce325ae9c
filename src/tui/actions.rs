use crossterm::event::{KeyCode, KeyEvent};

use crate::error::TicklistError;
use crate::filter::Filter;
use crate::models::{Todo, TodoDraft, TodoPatch};
use crate::store::Outcome;

use super::app::{App, EditorMode, EditorState, Popup, StatusKind};
use super::input_handler::InputResult;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Popups swallow every key while open
    if let Some(popup) = app.popup.take() {
        handle_popup_key(app, key, popup);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') => app.select_first(),
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('l') | KeyCode::Right => app.next_page(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_page(),

        // Filters
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),

        KeyCode::Char('T') => {
            let theme = app.toggle_theme();
            app.set_status(format!("Theme: {}", theme.label()), StatusKind::Info);
        }
        KeyCode::Char('?') => app.popup = Some(Popup::Help),

        KeyCode::Char('a') => app.popup = Some(Popup::Editor(EditorState::add())),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(editor) = app.selected_todo().map(EditorState::edit) {
                app.popup = Some(Popup::Editor(editor));
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('c') => {
            if let Some(id) = app.selected_id() {
                toggle_todo(app, &id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_id() {
                delete_todo(app, &id);
            }
        }
        KeyCode::Char('x') => {
            if app.stats().completed > 0 {
                app.popup = Some(Popup::ConfirmClear);
            } else {
                app.set_status("No completed todos to clear".to_string(), StatusKind::Info);
            }
        }

        _ => {}
    }
}

fn handle_popup_key(app: &mut App, key: KeyEvent, popup: Popup) {
    match popup {
        Popup::Help => {
            // Any dismiss key closes help; everything else keeps it open
            if !matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter
            ) {
                app.popup = Some(Popup::Help);
            }
        }
        Popup::ConfirmClear => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => clear_completed(app),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
            _ => app.popup = Some(Popup::ConfirmClear),
        },
        Popup::Editor(editor) => handle_editor_key(app, key, editor),
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent, mut editor: EditorState) {
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        editor.switch_focus();
        app.popup = Some(Popup::Editor(editor));
        return;
    }

    match editor.focused_mut().handle_key(key) {
        InputResult::Cancel => {}
        InputResult::Submit => submit_editor(app, editor),
        InputResult::Changed => {
            editor.error = None;
            app.popup = Some(Popup::Editor(editor));
        }
        InputResult::Ignored => app.popup = Some(Popup::Editor(editor)),
    }
}

fn submit_editor(app: &mut App, mut editor: EditorState) {
    let title = editor.title.value();
    let description = editor.description.value();

    match editor.mode.clone() {
        EditorMode::Add => match TodoDraft::new(&title, Some(&description)) {
            Ok(draft) => {
                let todo = Todo::new(draft);
                let short = todo.short_id().to_string();
                if app.apply(|t| t.store_mut().add(todo)).is_some() {
                    app.set_status(format!("Created todo {}", short), StatusKind::Success);
                }
            }
            Err(err) => {
                editor.error = Some(err.to_string());
                app.popup = Some(Popup::Editor(editor));
            }
        },
        EditorMode::Edit { id } => match TodoPatch::with_description(&title, &description) {
            Ok(patch) => {
                let outcome = app.apply(|t| t.store_mut().edit(&id, patch));
                match outcome {
                    Some(outcome) if outcome.changed() => {
                        app.set_status("Todo updated".to_string(), StatusKind::Success)
                    }
                    Some(_) => app.set_status("No changes".to_string(), StatusKind::Info),
                    None => {}
                }
            }
            Err(TicklistError::BlankTitle) => {
                app.set_status("Edit discarded: title is blank".to_string(), StatusKind::Info);
            }
            Err(err) => app.set_status(err.to_string(), StatusKind::Error),
        },
    }
}

// Store actions

fn toggle_todo(app: &mut App, id: &str) {
    match app.apply(|t| t.store_mut().toggle(id)) {
        Some(Outcome::Toggled { completed: true }) => {
            app.set_status("Marked as complete".to_string(), StatusKind::Success)
        }
        Some(Outcome::Toggled { completed: false }) => {
            app.set_status("Marked as active".to_string(), StatusKind::Success)
        }
        _ => {}
    }
}

fn delete_todo(app: &mut App, id: &str) {
    if let Some(Outcome::Deleted) = app.apply(|t| t.store_mut().delete(id)) {
        app.set_status("Todo deleted".to_string(), StatusKind::Success);
    }
}

fn clear_completed(app: &mut App) {
    if let Some(Outcome::Cleared(count)) = app.apply(|t| t.store_mut().clear_completed()) {
        app.set_status(
            format!("Cleared {} completed todo(s)", count),
            StatusKind::Success,
        );
    }
}
