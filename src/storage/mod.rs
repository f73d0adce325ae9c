mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::models::Todo;

/// Key the todo collection is stored under.
pub const TODOS_KEY: &str = "todos";

/// Trait abstracting durable key-value storage (a data directory, an
/// in-memory map, ...). Values are opaque text.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Reads and writes the whole todo collection as JSON under [`TODOS_KEY`].
pub struct TodoPersistence {
    backend: Box<dyn StorageBackend>,
}

impl TodoPersistence {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load the stored collection. A missing key, an unreadable backend or a
    /// value that does not parse all yield an empty collection.
    pub fn load(&self) -> Vec<Todo> {
        let raw = match self.backend.get_item(TODOS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored todos, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(todos) => todos,
            Err(err) => {
                tracing::warn!(error = %err, "stored todos are not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection.
    pub fn save(&self, todos: &[Todo]) -> Result<()> {
        let json = serde_json::to_string_pretty(todos)?;
        self.backend.set_item(TODOS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoDraft;

    fn todo(title: &str) -> Todo {
        Todo::new(TodoDraft::new(title, None).unwrap())
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = TodoPersistence::new(Box::new(MemoryStorage::new()));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_garbage_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(TODOS_KEY, "{not json").unwrap();
        let persistence = TodoPersistence::new(Box::new(storage));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load_is_lossless() {
        let persistence = TodoPersistence::new(Box::new(MemoryStorage::new()));
        let mut todos = vec![todo("one"), todo("two")];
        todos[1].completed = true;
        todos[0].description = Some("details".to_string());

        persistence.save(&todos).unwrap();
        assert_eq!(persistence.load(), todos);
    }

    #[test]
    fn test_load_mixed_legacy_and_current_records() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                TODOS_KEY,
                r#"[
                    {"id":"a","text":"Buy milk","completed":false},
                    {"id":"b","title":"Walk dog","description":"park","date":"Mon Oct 12 2026","time":"09:30","completed":true}
                ]"#,
            )
            .unwrap();
        let todos = TodoPersistence::new(Box::new(storage)).load();

        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Buy milk");
        assert_eq!(todos[1].description.as_deref(), Some("park"));
        assert!(todos[1].completed);
    }
}
