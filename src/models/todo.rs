use serde::{Deserialize, Serialize};

use crate::error::{Result, TicklistError};

const DATE_FORMAT: &str = "%a %b %d %Y";
const TIME_FORMAT: &str = "%H:%M";

/// A single todo record.
///
/// Records written by the older text-only schema (`{"id","text","completed"}`)
/// load into this type with `title` taken from `text` and no description or
/// creation stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,

    #[serde(alias = "text")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo from a validated draft, with a fresh id and the
    /// current local date and time.
    pub fn new(draft: TodoDraft) -> Self {
        let now = chrono::Local::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            date: Some(now.format(DATE_FORMAT).to_string()),
            time: Some(now.format(TIME_FORMAT).to_string()),
            completed: false,
        }
    }

    /// First eight characters of the id, enough to address a todo from the CLI.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// Creation stamp for display, e.g. "Mon Oct 12 2026 09:30".
    pub fn created(&self) -> Option<String> {
        match (&self.date, &self.time) {
            (Some(date), Some(time)) => Some(format!("{} {}", date, time)),
            (Some(date), None) => Some(date.clone()),
            (None, Some(time)) => Some(time.clone()),
            (None, None) => None,
        }
    }
}

/// Trims a title and rejects it when nothing is left.
fn clean_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TicklistError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as absent.
fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Validated input for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title: String,
    description: Option<String>,
}

impl TodoDraft {
    pub fn new(title: &str, description: Option<&str>) -> Result<Self> {
        Ok(Self {
            title: clean_title(title)?,
            description: clean_description(description),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Validated replacement for the text fields of an existing todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    title: String,
    /// `None` keeps the current description, `Some(None)` clears it.
    description: Option<Option<String>>,
}

impl TodoPatch {
    /// Title-only patch that skips validation.
    #[cfg(test)]
    pub(crate) fn unchecked(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
        }
    }

    /// Patch that only replaces the title.
    pub fn title(title: &str) -> Result<Self> {
        Ok(Self {
            title: clean_title(title)?,
            description: None,
        })
    }

    /// Patch that replaces both title and description; a blank description
    /// clears it.
    pub fn with_description(title: &str, description: &str) -> Result<Self> {
        Ok(Self {
            title: clean_title(title)?,
            description: Some(clean_description(Some(description))),
        })
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Writes the patch into `todo`. Returns false when nothing changed.
    pub fn apply_to(&self, todo: &mut Todo) -> bool {
        let mut changed = false;
        if todo.title != self.title {
            todo.title = self.title.clone();
            changed = true;
        }
        if let Some(description) = &self.description {
            if &todo.description != description {
                todo.description = description.clone();
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_is_open_and_stamped() {
        let todo = Todo::new(TodoDraft::new("  Buy milk ", None).unwrap());
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert!(todo.date.is_some());
        assert!(todo.time.is_some());
        assert_eq!(todo.short_id().len(), 8);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Todo::new(TodoDraft::new("a", None).unwrap());
        let b = Todo::new(TodoDraft::new("a", None).unwrap());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(matches!(
            TodoDraft::new("   ", None),
            Err(TicklistError::BlankTitle)
        ));
        assert!(matches!(
            TodoPatch::title("\t\n"),
            Err(TicklistError::BlankTitle)
        ));
    }

    #[test]
    fn test_blank_description_dropped() {
        let draft = TodoDraft::new("Title", Some("   ")).unwrap();
        let todo = Todo::new(draft);
        assert_eq!(todo.description, None);
    }

    #[test]
    fn test_legacy_text_record_loads() {
        let json = r#"{"id":"abc","text":"Walk dog","completed":true}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.title, "Walk dog");
        assert!(todo.completed);
        assert_eq!(todo.description, None);
        assert_eq!(todo.date, None);
        assert_eq!(todo.created(), None);
    }

    #[test]
    fn test_absent_optional_fields_are_not_written() {
        let todo = Todo {
            id: "x".to_string(),
            title: "t".to_string(),
            description: None,
            date: None,
            time: None,
            completed: false,
        };
        let json = serde_json::to_string(&todo).unwrap();
        assert_eq!(json, r#"{"id":"x","title":"t","completed":false}"#);
    }

    #[test]
    fn test_patch_keeps_description_unless_given() {
        let mut todo = Todo::new(TodoDraft::new("Old", Some("notes")).unwrap());

        assert!(TodoPatch::title("New").unwrap().apply_to(&mut todo));
        assert_eq!(todo.title, "New");
        assert_eq!(todo.description.as_deref(), Some("notes"));

        assert!(TodoPatch::with_description("New", "")
            .unwrap()
            .apply_to(&mut todo));
        assert_eq!(todo.description, None);

        assert!(!TodoPatch::title("New").unwrap().apply_to(&mut todo));
    }
}
