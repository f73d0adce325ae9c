use crate::error::{Result, TicklistError};
use crate::models::{Todo, TodoPatch};
use crate::storage::{StorageBackend, TodoPersistence};

/// A mutation request against the todo collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(Todo),
    Toggle(String),
    Delete(String),
    Edit { id: String, patch: TodoPatch },
    ClearCompleted,
}

/// What applying an [`Action`] did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Toggled { completed: bool },
    Deleted,
    Edited,
    Cleared(usize),
    Unchanged,
}

impl Outcome {
    pub fn changed(self) -> bool {
        !matches!(self, Outcome::Unchanged | Outcome::Cleared(0))
    }
}

/// Apply `action` to `todos` in place.
///
/// Lookups that miss are no-ops, as is an edit whose title is blank or an
/// add whose id is already taken. Insertion order is preserved by every
/// action.
pub fn reduce(todos: &mut Vec<Todo>, action: &Action) -> Outcome {
    match action {
        Action::Add(todo) => {
            if todos.iter().any(|t| t.id == todo.id) {
                tracing::warn!(id = %todo.id, "todo id already exists, add ignored");
                return Outcome::Unchanged;
            }
            todos.push(todo.clone());
            Outcome::Added
        }
        Action::Toggle(id) => match todos.iter_mut().find(|t| &t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                Outcome::Toggled {
                    completed: todo.completed,
                }
            }
            None => Outcome::Unchanged,
        },
        Action::Delete(id) => {
            let before = todos.len();
            todos.retain(|t| &t.id != id);
            if todos.len() < before {
                Outcome::Deleted
            } else {
                Outcome::Unchanged
            }
        }
        Action::Edit { id, patch } => {
            if patch.is_blank() {
                return Outcome::Unchanged;
            }
            match todos.iter_mut().find(|t| &t.id == id) {
                Some(todo) => {
                    if patch.apply_to(todo) {
                        Outcome::Edited
                    } else {
                        Outcome::Unchanged
                    }
                }
                None => Outcome::Unchanged,
            }
        }
        Action::ClearCompleted => {
            let before = todos.len();
            todos.retain(|t| !t.completed);
            Outcome::Cleared(before - todos.len())
        }
    }
}

/// Counts shown in the progress overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub percent: u32,
}

impl Stats {
    pub fn of(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        let total = todos.len();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u32
        };

        Self {
            total,
            active: total - completed,
            completed,
            percent,
        }
    }
}

/// Owner of the todo collection. Every mutation goes through [`dispatch`]
/// and is written through to storage before it becomes visible.
///
/// [`dispatch`]: TodoStore::dispatch
pub struct TodoStore {
    todos: Vec<Todo>,
    persistence: TodoPersistence,
}

impl TodoStore {
    /// Open a store over `backend`, loading whatever it holds.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let persistence = TodoPersistence::new(backend);
        let todos = persistence.load();
        tracing::debug!(count = todos.len(), "loaded todos");
        Self { todos, persistence }
    }

    /// Apply an action and persist the full collection.
    ///
    /// The action is applied to a copy; the copy replaces the live
    /// collection only once it has been saved, so a failed write leaves
    /// the store exactly as it was. A blank edit is rejected before
    /// anything is written.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let mut outcomes = self.dispatch_all(vec![action])?;
        Ok(outcomes.pop().unwrap_or(Outcome::Unchanged))
    }

    /// Apply several actions in order and persist once. Either all of them
    /// are saved or none is.
    pub fn dispatch_all(&mut self, actions: Vec<Action>) -> Result<Vec<Outcome>> {
        let all_blank = actions
            .iter()
            .all(|action| matches!(action, Action::Edit { patch, .. } if patch.is_blank()));
        if all_blank {
            return Ok(vec![Outcome::Unchanged; actions.len()]);
        }

        let mut next = self.todos.clone();
        let outcomes: Vec<Outcome> = actions.iter().map(|a| reduce(&mut next, a)).collect();

        if let Err(err) = self.persistence.save(&next) {
            tracing::error!(
                error = %err,
                actions = actions.len(),
                "failed to persist todos, change rolled back"
            );
            return Err(err);
        }

        tracing::debug!(?outcomes, count = next.len(), "todos updated");
        self.todos = next;
        Ok(outcomes)
    }

    pub fn add(&mut self, todo: Todo) -> Result<Outcome> {
        self.dispatch(Action::Add(todo))
    }

    pub fn toggle(&mut self, id: &str) -> Result<Outcome> {
        self.dispatch(Action::Toggle(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<Outcome> {
        self.dispatch(Action::Delete(id.to_string()))
    }

    pub fn edit(&mut self, id: &str, patch: TodoPatch) -> Result<Outcome> {
        self.dispatch(Action::Edit {
            id: id.to_string(),
            patch,
        })
    }

    pub fn clear_completed(&mut self) -> Result<Outcome> {
        self.dispatch(Action::ClearCompleted)
    }

    /// Snapshot of the collection in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Find a todo by full id or by an unambiguous id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Todo> {
        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(TicklistError::UnknownId(id_or_prefix.to_string()));
        }
        if let Some(todo) = self.get(needle) {
            return Ok(todo);
        }

        let mut matches = self.todos.iter().filter(|t| t.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(todo), None) => Ok(todo),
            (Some(_), Some(_)) => Err(TicklistError::AmbiguousId(needle.to_string())),
            (None, _) => Err(TicklistError::UnknownId(needle.to_string())),
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.todos)
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::filter::Filter;
    use crate::models::TodoDraft;
    use crate::storage::{MemoryStorage, TODOS_KEY};

    fn todo(title: &str) -> Todo {
        Todo::new(TodoDraft::new(title, None).unwrap())
    }

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.title.as_str()).collect()
    }

    /// Memory backend shared with the test so writes can be observed and
    /// made to fail.
    #[derive(Clone, Default)]
    struct SharedStorage {
        inner: Rc<MemoryStorage>,
        writes: Rc<Cell<usize>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl StorageBackend for SharedStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(TicklistError::Storage("quota exceeded".to_string()));
            }
            self.writes.set(self.writes.get() + 1);
            self.inner.set_item(key, value)
        }
    }

    impl SharedStorage {
        fn stored(&self) -> Vec<Todo> {
            let raw = self.inner.get_item(TODOS_KEY).unwrap().unwrap_or_default();
            serde_json::from_str(&raw).unwrap_or_default()
        }
    }

    fn open() -> (TodoStore, SharedStorage) {
        let storage = SharedStorage::default();
        (TodoStore::new(Box::new(storage.clone())), storage)
    }

    #[test]
    fn test_add_appends_and_writes_through() {
        let (mut store, storage) = open();
        store.add(todo("first")).unwrap();
        store.add(todo("second")).unwrap();

        assert_eq!(titles(store.todos()), ["first", "second"]);
        assert_eq!(storage.stored(), store.todos());
        assert_eq!(storage.writes.get(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_record() {
        let (mut store, _) = open();
        store.add(todo("a")).unwrap();
        let original = store.todos()[0].clone();

        assert_eq!(
            store.toggle(&original.id).unwrap(),
            Outcome::Toggled { completed: true }
        );
        store.toggle(&original.id).unwrap();
        assert_eq!(store.todos()[0], original);
    }

    #[test]
    fn test_unknown_id_is_noop_but_still_written() {
        let (mut store, storage) = open();
        store.add(todo("a")).unwrap();
        let before = store.todos().to_vec();

        assert_eq!(store.toggle("nope").unwrap(), Outcome::Unchanged);
        assert_eq!(store.delete("nope").unwrap(), Outcome::Unchanged);
        assert_eq!(
            store.edit("nope", TodoPatch::title("x").unwrap()).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(store.todos(), before.as_slice());
        assert_eq!(storage.writes.get(), 4);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (mut store, storage) = open();
        for title in ["a", "b", "c"] {
            store.add(todo(title)).unwrap();
        }
        let id = store.todos()[1].id.clone();

        assert_eq!(store.delete(&id).unwrap(), Outcome::Deleted);
        assert_eq!(titles(store.todos()), ["a", "c"]);
        assert_eq!(titles(&storage.stored()), ["a", "c"]);
    }

    #[test]
    fn test_edit_replaces_text_in_place() {
        let (mut store, _) = open();
        store.add(todo("a")).unwrap();
        store.add(todo("b")).unwrap();
        let id = store.todos()[0].id.clone();

        let patch = TodoPatch::with_description("a2", "more").unwrap();
        assert_eq!(store.edit(&id, patch).unwrap(), Outcome::Edited);
        assert_eq!(titles(store.todos()), ["a2", "b"]);
        assert_eq!(store.todos()[0].description.as_deref(), Some("more"));
        assert_eq!(store.todos()[0].id, id);
    }

    #[test]
    fn test_blank_edit_is_rejected_without_writing() {
        let (mut store, storage) = open();
        store.add(todo("keep")).unwrap();
        let id = store.todos()[0].id.clone();
        let patch = TodoPatch::unchecked("   ");

        assert_eq!(store.edit(&id, patch).unwrap(), Outcome::Unchanged);
        assert_eq!(store.todos()[0].title, "keep");
        assert_eq!(storage.writes.get(), 1);
    }

    #[test]
    fn test_clear_completed_keeps_order_of_rest() {
        let (mut store, _) = open();
        for title in ["a", "b", "c", "d"] {
            store.add(todo(title)).unwrap();
        }
        let ids: Vec<String> = store.todos().iter().map(|t| t.id.clone()).collect();
        store.toggle(&ids[0]).unwrap();
        store.toggle(&ids[2]).unwrap();

        assert_eq!(store.clear_completed().unwrap(), Outcome::Cleared(2));
        assert_eq!(titles(store.todos()), ["b", "d"]);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (mut store, storage) = open();
        store.add(todo("a")).unwrap();
        let id = store.todos()[0].id.clone();

        storage.fail_writes.set(true);
        assert!(store.toggle(&id).is_err());
        assert!(store.add(todo("b")).is_err());
        assert!(!store.todos()[0].completed);
        assert_eq!(store.todos().len(), 1);
        assert_eq!(storage.stored(), store.todos());
    }

    #[test]
    fn test_reopen_sees_persisted_state() {
        let (mut store, storage) = open();
        store.add(todo("persisted")).unwrap();
        let id = store.todos()[0].id.clone();
        store.toggle(&id).unwrap();

        let reopened = TodoStore::new(Box::new(storage));
        assert_eq!(reopened.todos(), store.todos());
    }

    #[test]
    fn test_resolve_by_prefix() {
        let (mut store, _) = open();
        let mut a = todo("a");
        a.id = "abc111".to_string();
        let mut b = todo("b");
        b.id = "abd222".to_string();
        store.add(a).unwrap();
        store.add(b).unwrap();

        assert_eq!(store.resolve("abc").unwrap().title, "a");
        assert_eq!(store.resolve("abd222").unwrap().title, "b");
        assert!(matches!(
            store.resolve("ab"),
            Err(TicklistError::AmbiguousId(_))
        ));
        assert!(matches!(
            store.resolve("zz"),
            Err(TicklistError::UnknownId(_))
        ));
        assert!(matches!(store.resolve(" "), Err(TicklistError::UnknownId(_))));
    }

    #[test]
    fn test_stats() {
        let (mut store, _) = open();
        assert_eq!(store.stats(), Stats::default());
        for title in ["a", "b", "c"] {
            store.add(todo(title)).unwrap();
        }
        let id = store.todos()[0].id.clone();
        store.toggle(&id).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.percent, 33);
    }

    #[test]
    fn test_buy_milk_walk_dog_scenario() {
        let (mut store, _) = open();
        store.add(todo("Buy milk")).unwrap();
        assert_eq!(titles(store.todos()), ["Buy milk"]);
        assert!(!store.todos()[0].completed);

        let milk = store.todos()[0].id.clone();
        store.toggle(&milk).unwrap();
        assert!(store.todos()[0].completed);

        store.add(todo("Walk dog")).unwrap();
        assert_eq!(titles(store.todos()), ["Buy milk", "Walk dog"]);

        let active: Vec<&str> = Filter::Active
            .apply(store.todos())
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(active, ["Walk dog"]);

        store.clear_completed().unwrap();
        assert_eq!(titles(store.todos()), ["Walk dog"]);
    }

    #[test]
    fn test_add_with_taken_id_is_ignored() {
        let (mut store, storage) = open();
        let first = todo("first");
        let mut clash = todo("second");
        clash.id = first.id.clone();

        assert_eq!(store.add(first.clone()).unwrap(), Outcome::Added);
        assert_eq!(store.add(clash).unwrap(), Outcome::Unchanged);
        assert_eq!(store.todos(), [first.clone()].as_slice());
        assert_eq!(storage.stored(), store.todos());

        assert_eq!(store.delete(&first.id).unwrap(), Outcome::Deleted);
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_with_same_text_is_unchanged() {
        let (mut store, _) = open();
        store.add(todo("same")).unwrap();
        let id = store.todos()[0].id.clone();

        let patch = TodoPatch::title("same").unwrap();
        assert_eq!(store.edit(&id, patch).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_dispatch_all_writes_once() {
        let (mut store, storage) = open();
        store.add(todo("a")).unwrap();
        store.add(todo("b")).unwrap();
        let ids: Vec<String> = store.todos().iter().map(|t| t.id.clone()).collect();

        let outcomes = store
            .dispatch_all(ids.iter().cloned().map(Action::Toggle).collect())
            .unwrap();
        assert_eq!(outcomes, vec![Outcome::Toggled { completed: true }; 2]);
        assert_eq!(storage.writes.get(), 3);
        assert!(storage.stored().iter().all(|t| t.completed));
    }

    #[test]
    fn test_dispatch_all_failure_applies_nothing() {
        let (mut store, storage) = open();
        store.add(todo("a")).unwrap();
        store.add(todo("b")).unwrap();
        let before = store.todos().to_vec();
        let ids: Vec<String> = before.iter().map(|t| t.id.clone()).collect();

        storage.fail_writes.set(true);
        assert!(store
            .dispatch_all(ids.into_iter().map(Action::Delete).collect())
            .is_err());
        assert_eq!(store.todos(), before.as_slice());
    }
}
