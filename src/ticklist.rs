use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::directory::resolve_ticklist_directory;
use crate::error::{Result, TicklistError};
use crate::filter::Filter;
use crate::models::{Todo, TodoDraft, TodoPatch};
use crate::pagination::Paginator;
use crate::render::Render;
use crate::storage::{LocalStorage, MemoryStorage, StorageBackend};
use crate::store::{Action, Outcome, TodoStore};

/// Where the store keeps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Files under the resolved data directory
    Local,
    /// In-memory only; nothing survives the process
    Ephemeral,
}

/// The store plus the configuration and output it is used with. Shared by
/// the CLI and the TUI.
pub struct Ticklist {
    store: TodoStore,
    config: Config,
    render: Render,
    data_dir: Option<PathBuf>,
}

impl Ticklist {
    pub fn new(ticklist_dir: Option<&Path>, mode: StorageMode) -> Result<Self> {
        let config = Config::load_or_default();
        let data_dir = Self::data_dir_for(ticklist_dir, mode, &config)?;
        Self::open(config, data_dir)
    }

    /// The directory `mode` stores into, resolved against `config`. None
    /// for ephemeral storage.
    pub fn data_dir_for(
        ticklist_dir: Option<&Path>,
        mode: StorageMode,
        config: &Config,
    ) -> Result<Option<PathBuf>> {
        match mode {
            StorageMode::Local => Ok(Some(resolve_ticklist_directory(ticklist_dir, config)?)),
            StorageMode::Ephemeral => Ok(None),
        }
    }

    /// Open the store in `data_dir`, or in memory when there is none.
    pub fn open(config: Config, data_dir: Option<PathBuf>) -> Result<Self> {
        let backend: Box<dyn StorageBackend> = match &data_dir {
            Some(dir) => Box::new(LocalStorage::new(dir)?),
            None => Box::new(MemoryStorage::new()),
        };
        Ok(Self::with_backend(config, backend, data_dir))
    }

    pub fn with_backend(
        config: Config,
        backend: Box<dyn StorageBackend>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        let store = TodoStore::new(backend);
        let render = Render::new(config.clone());
        Self {
            store,
            config,
            render,
            data_dir,
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TodoStore {
        &mut self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Data directory, when storage is on disk.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    fn remove_duplicates(ids: &[String]) -> Vec<String> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.iter().filter(|id| seen.insert(id.as_str())).cloned().collect()
    }

    /// Resolve every id (or prefix) before anything is mutated, so a typo
    /// in the middle of a list changes nothing.
    fn resolve_ids(&self, input: &[String]) -> Result<Vec<String>> {
        if input.is_empty() {
            return Err(TicklistError::MissingId);
        }

        let mut resolved = Vec::with_capacity(input.len());
        for id in input {
            resolved.push(self.store.resolve(id)?.id.clone());
        }
        Ok(Self::remove_duplicates(&resolved))
    }

    fn short_ids(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.store
                    .get(id)
                    .map(|t| t.short_id().to_string())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }

    pub fn create_todo(&mut self, input: &[String], description: Option<&str>) -> Result<()> {
        let draft = TodoDraft::new(&input.join(" "), description)?;
        let todo = Todo::new(draft);
        self.store.add(todo.clone())?;
        self.render.success_create(&todo);
        Ok(())
    }

    pub fn toggle_todos(&mut self, input: &[String]) -> Result<()> {
        let ids = self.resolve_ids(input)?;

        let actions = ids.iter().cloned().map(Action::Toggle).collect();
        let outcomes = self.store.dispatch_all(actions)?;

        let mut checked = Vec::new();
        let mut unchecked = Vec::new();
        for (id, outcome) in ids.iter().zip(outcomes) {
            match outcome {
                Outcome::Toggled { completed: true } => checked.push(id.clone()),
                Outcome::Toggled { completed: false } => unchecked.push(id.clone()),
                _ => {}
            }
        }

        self.render.mark_complete(&self.short_ids(&checked));
        self.render.mark_incomplete(&self.short_ids(&unchecked));
        Ok(())
    }

    pub fn delete_todos(&mut self, input: &[String]) -> Result<()> {
        let ids = self.resolve_ids(input)?;
        let short = self.short_ids(&ids);

        self.store
            .dispatch_all(ids.into_iter().map(Action::Delete).collect())?;

        self.render.success_delete(&short);
        Ok(())
    }

    /// `input` is the id followed by the new title. With no title words the
    /// current title is kept, which lets `--description` be edited alone.
    pub fn edit_todo(&mut self, input: &[String], description: Option<&str>) -> Result<()> {
        let (target, title_words) = input.split_first().ok_or(TicklistError::MissingId)?;
        let current = self.store.resolve(target)?;
        let id = current.id.clone();
        let short = current.short_id().to_string();

        let title = if title_words.is_empty() {
            if description.is_none() {
                return Err(TicklistError::BlankTitle);
            }
            current.title.clone()
        } else {
            title_words.join(" ")
        };

        let patch = match description {
            Some(description) => TodoPatch::with_description(&title, description)?,
            None => TodoPatch::title(&title)?,
        };

        match self.store.edit(&id, patch)? {
            Outcome::Edited => self.render.success_edit(&short),
            _ => self.render.unchanged_edit(&short),
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        match self.store.clear_completed()? {
            Outcome::Cleared(count) => self.render.success_clear(count),
            _ => self.render.success_clear(0),
        }
        Ok(())
    }

    /// Print one page of the list under `filter`. Pages past the end fall
    /// back to the last page.
    pub fn display_list(&self, filter: Filter, page: usize) -> Result<()> {
        let visible = filter.apply(self.store.todos());

        let mut pager = Paginator::default();
        for _ in 1..page {
            if !pager.next_page(visible.len()) {
                break;
            }
        }

        self.render.display_page(&visible, filter, &pager);
        self.render.display_stats(&self.store.stats());
        Ok(())
    }

    pub fn display_theme(&self) {
        self.render.display_theme(self.config.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticklist() -> Ticklist {
        let config = Config {
            display_progress_overview: false,
            ..Config::default()
        };
        Ticklist::with_backend(config, Box::new(MemoryStorage::new()), None)
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn titles(ticklist: &Ticklist) -> Vec<String> {
        ticklist
            .store()
            .todos()
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn test_create_joins_words() {
        let mut tl = ticklist();
        tl.create_todo(&words("Buy oat milk"), Some("the big one"))
            .unwrap();
        assert_eq!(titles(&tl), ["Buy oat milk"]);
        assert_eq!(
            tl.store().todos()[0].description.as_deref(),
            Some("the big one")
        );
    }

    #[test]
    fn test_create_blank_is_rejected() {
        let mut tl = ticklist();
        assert!(matches!(
            tl.create_todo(&[], None),
            Err(TicklistError::BlankTitle)
        ));
        assert!(tl.store().is_empty());
    }

    #[test]
    fn test_toggle_by_prefix_and_duplicates() {
        let mut tl = ticklist();
        tl.create_todo(&words("a"), None).unwrap();
        let short = tl.store().todos()[0].short_id().to_string();

        tl.toggle_todos(&[short.clone(), short]).unwrap();
        assert!(tl.store().todos()[0].completed);
    }

    #[test]
    fn test_bad_id_in_list_changes_nothing() {
        let mut tl = ticklist();
        tl.create_todo(&words("a"), None).unwrap();
        tl.create_todo(&words("b"), None).unwrap();
        let first = tl.store().todos()[0].id.clone();

        let result = tl.delete_todos(&[first, "zzzz-not-there".to_string()]);
        assert!(matches!(result, Err(TicklistError::UnknownId(_))));
        assert_eq!(titles(&tl), ["a", "b"]);
    }

    #[test]
    fn test_missing_ids() {
        let mut tl = ticklist();
        assert!(matches!(tl.toggle_todos(&[]), Err(TicklistError::MissingId)));
        assert!(matches!(tl.edit_todo(&[], None), Err(TicklistError::MissingId)));
    }

    #[test]
    fn test_edit_title_and_description() {
        let mut tl = ticklist();
        tl.create_todo(&words("old"), Some("keep me")).unwrap();
        let id = tl.store().todos()[0].id.clone();

        tl.edit_todo(&[id.clone(), "new".into(), "title".into()], None)
            .unwrap();
        assert_eq!(titles(&tl), ["new title"]);
        assert_eq!(tl.store().todos()[0].description.as_deref(), Some("keep me"));

        tl.edit_todo(&[id.clone()], Some("replaced")).unwrap();
        assert_eq!(titles(&tl), ["new title"]);
        assert_eq!(tl.store().todos()[0].description.as_deref(), Some("replaced"));
    }

    #[test]
    fn test_edit_to_blank_is_discarded() {
        let mut tl = ticklist();
        tl.create_todo(&words("stay"), None).unwrap();
        let id = tl.store().todos()[0].id.clone();

        assert!(matches!(
            tl.edit_todo(&[id.clone(), "   ".into()], None),
            Err(TicklistError::BlankTitle)
        ));
        assert!(matches!(
            tl.edit_todo(&[id], None),
            Err(TicklistError::BlankTitle)
        ));
        assert_eq!(titles(&tl), ["stay"]);
    }

    #[test]
    fn test_clear_removes_completed() {
        let mut tl = ticklist();
        tl.create_todo(&words("done"), None).unwrap();
        tl.create_todo(&words("open"), None).unwrap();
        let id = tl.store().todos()[0].id.clone();
        tl.toggle_todos(&[id]).unwrap();

        tl.clear().unwrap();
        assert_eq!(titles(&tl), ["open"]);
    }

    #[test]
    fn test_display_list_past_last_page() {
        let mut tl = ticklist();
        for i in 0..3 {
            tl.create_todo(&[format!("todo {i}")], None).unwrap();
        }
        tl.display_list(Filter::All, 9).unwrap();
        tl.display_list(Filter::Completed, 1).unwrap();
    }

    /// Memory storage that refuses writes once its allowance runs out.
    #[derive(Default)]
    struct Rationed {
        inner: MemoryStorage,
        writes_left: std::cell::Cell<usize>,
    }

    impl StorageBackend for std::rc::Rc<Rationed> {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            let left = self.writes_left.get();
            if left == 0 {
                return Err(TicklistError::Storage("disk full".to_string()));
            }
            self.writes_left.set(left - 1);
            self.inner.set_item(key, value)
        }
    }

    #[test]
    fn test_multi_id_commands_write_once() {
        let storage = std::rc::Rc::new(Rationed::default());
        storage.writes_left.set(3);
        let mut tl = Ticklist::with_backend(Config::default(), Box::new(storage.clone()), None);
        tl.create_todo(&words("a"), None).unwrap();
        tl.create_todo(&words("b"), None).unwrap();
        let ids: Vec<String> = tl.store().todos().iter().map(|t| t.id.clone()).collect();

        // One write left: both toggles have to fit in it
        tl.toggle_todos(&ids).unwrap();
        assert!(tl.store().todos().iter().all(|t| t.completed));
        assert_eq!(storage.writes_left.get(), 0);

        assert!(tl.delete_todos(&ids).is_err());
        assert_eq!(titles(&tl), ["a", "b"]);
    }
}
