//! Application state and controller.
//!
//! Houses the single [`State`] instance that owns the task list, the active
//! filter, the persistence adapter and all transient UI state. Every user
//! action funnels into a method here; mutating methods synchronously persist
//! the full list and rebuild the view model in the same call, so the
//! renderer always draws from a fresh description.

use crate::store::Store;
use crate::tasks::{Filter, TaskList};
use crate::view::{self, ViewModel};
use log::*;
use std::path::PathBuf;

/// Specifying the different input modes.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a new task title into the entry field.
    AddInput,
    /// Editing the selected task's title in place.
    EditInput,
}

/// Specifying the different modal overlays. A modal captures all key input
/// until it is confirmed or dismissed.
///
#[derive(Debug, PartialEq, Eq)]
pub enum Modal {
    /// Pending delete confirmation for the task with the given id.
    ConfirmDelete(String),
    /// Blocking notification, dismissed without side effects.
    Alert(String),
    /// Prompt for the path of a file to import.
    ImportPath,
}

/// Cursor-addressable text buffer backing the entry field, the in-place
/// title editor and the import path prompt.
///
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl InputBuffer {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replace the contents and place the caret at the end.
    ///
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }
}

/// Houses data representative of application state.
///
pub struct State {
    tasks: TaskList,
    filter: Filter,
    store: Store,
    export_dir: PathBuf,
    view: ViewModel,
    mode: Mode,
    modal: Option<Modal>,
    input: InputBuffer,
    editing_id: Option<String>,
    selected: usize,
    show_log: bool,
}

impl State {
    /// Load the persisted task list and derive the initial view. The filter
    /// always starts at `All`; it is never persisted.
    ///
    pub fn new(store: Store, export_dir: PathBuf) -> State {
        let tasks = TaskList::new(store.load());
        let filter = Filter::default();
        let view = view::build(&tasks, filter);
        State {
            tasks,
            filter,
            store,
            export_dir,
            view,
            mode: Mode::Normal,
            modal: None,
            input: InputBuffer::default(),
            editing_id: None,
            selected: 0,
            show_log: false,
        }
    }

    // ---------- accessors ----------

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn show_log(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    #[cfg(test)]
    fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    // ---------- selection ----------

    pub fn next_row(&mut self) {
        if !self.view.rows.is_empty() && self.selected + 1 < self.view.rows.len() {
            self.selected += 1;
        }
    }

    pub fn previous_row(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn selected_id(&self) -> Option<String> {
        self.view.rows.get(self.selected).map(|row| row.id.clone())
    }

    // ---------- task mutations ----------

    /// Add a task from the entry buffer. Empty or whitespace-only input is a
    /// no-op: nothing is persisted and the view is not rebuilt. The entry
    /// field stays open for the next title either way.
    ///
    pub fn submit_add(&mut self) {
        let title = self.input.text();
        self.input.clear();
        if self.tasks.add(&title) {
            debug!("Added task '{}'", title.trim());
            self.persist_and_rebuild();
        }
    }

    pub fn start_add(&mut self) {
        self.input.clear();
        self.mode = Mode::AddInput;
    }

    pub fn cancel_add(&mut self) {
        self.input.clear();
        self.mode = Mode::Normal;
    }

    /// Invert the completion flag of the given task. Persists and rebuilds
    /// even when the id no longer matches anything.
    ///
    pub fn toggle_done(&mut self, id: &str) {
        self.tasks.toggle_done(id);
        self.persist_and_rebuild();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.toggle_done(&id);
        }
    }

    /// Ask for confirmation before deleting the selected task.
    ///
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.modal = Some(Modal::ConfirmDelete(id));
        }
    }

    /// Confirm the pending modal. Deleting is the only confirmation with a
    /// side effect; an alert is simply dismissed.
    ///
    pub fn confirm_modal(&mut self) {
        match self.modal.take() {
            Some(Modal::ConfirmDelete(id)) => {
                debug!("Deleting task '{}'", id);
                self.tasks.remove(&id);
                self.persist_and_rebuild();
            }
            Some(Modal::Alert(_)) | None => {}
            Some(Modal::ImportPath) => {
                // Confirmed through submit_import; restore the prompt.
                self.modal = Some(Modal::ImportPath);
            }
        }
    }

    /// Dismiss the pending modal with no side effects.
    ///
    pub fn dismiss_modal(&mut self) {
        if matches!(self.modal, Some(Modal::ImportPath)) {
            self.input.clear();
        }
        self.modal = None;
    }

    /// Begin editing the selected task's title. The buffer is pre-filled
    /// with the current title and the caret placed at the end.
    ///
    pub fn start_edit_selected(&mut self) {
        let id = match self.selected_id() {
            Some(id) => id,
            None => return,
        };
        let title = match self.tasks.get(&id) {
            Some(task) => task.title.clone(),
            None => return,
        };
        self.input.set(&title);
        self.editing_id = Some(id);
        self.mode = Mode::EditInput;
    }

    /// Commit the edit buffer. A title edited down to nothing removes the
    /// task entirely, without confirmation.
    ///
    pub fn commit_edit(&mut self) {
        if let Some(id) = self.editing_id.take() {
            let new_title = self.input.text();
            self.tasks.edit_title(&id, &new_title);
            self.persist_and_rebuild();
        }
        self.input.clear();
        self.mode = Mode::Normal;
    }

    /// Discard the edit buffer and rebuild without committing.
    ///
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.input.clear();
        self.mode = Mode::Normal;
        self.rebuild();
    }

    /// Drop every completed task.
    ///
    pub fn clear_completed(&mut self) {
        self.tasks.clear_completed();
        self.persist_and_rebuild();
    }

    /// Switch the visible subset. Touches neither the task list nor storage.
    ///
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.rebuild();
    }

    // ---------- export / import ----------

    /// Write the current list, pretty-printed, to `todos.json` in the export
    /// directory. Failures are logged, not surfaced.
    ///
    pub fn export(&mut self) {
        match self.store.export_to_file(self.tasks.tasks(), &self.export_dir) {
            Ok(path) => info!("Exported {} tasks to {}", self.tasks.len(), path.display()),
            Err(e) => error!("Failed to export tasks: {}", e),
        }
    }

    /// Open the import path prompt.
    ///
    pub fn start_import(&mut self) {
        self.input.clear();
        self.modal = Some(Modal::ImportPath);
    }

    /// Import the file named in the prompt buffer, replacing the whole list
    /// on success. On failure the current list is left unmodified and a
    /// blocking alert names the reason.
    ///
    pub fn submit_import(&mut self) {
        let path = PathBuf::from(self.input.text());
        self.input.clear();
        match Store::import_from_file(&path) {
            Ok(raw) => {
                self.tasks.replace_with(&raw);
                self.modal = None;
                self.persist_and_rebuild();
                info!("Imported {} tasks from {}", self.tasks.len(), path.display());
            }
            Err(e) => {
                warn!("Import from {} failed: {}", path.display(), e);
                self.modal = Some(Modal::Alert(format!("Failed to import JSON: {}", e)));
            }
        }
    }

    // ---------- persistence / view ----------

    fn persist_and_rebuild(&mut self) {
        self.store.save(self.tasks.tasks());
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.view = view::build(&self.tasks, self.filter);
        if self.view.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.view.rows.len() {
            self.selected = self.view.rows.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStorage, STORAGE_KEY, Storage, Store};
    use crate::tasks::Task;
    use std::fs;
    use std::path::Path;

    fn new_state() -> (State, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = Store::new(Box::new(storage.clone()));
        (State::new(store, PathBuf::from("/tmp")), storage)
    }

    fn add_task(state: &mut State, title: &str) {
        state.start_add();
        state.input.set(title);
        state.submit_add();
        state.cancel_add();
    }

    fn persisted(storage: &MemoryStorage) -> Option<Vec<Task>> {
        storage
            .read(STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_add_increases_count_and_prepends() {
        let (mut state, storage) = new_state();
        add_task(&mut state, "first");
        add_task(&mut state, "second");

        assert_eq!(state.view().total_count, 2);
        assert_eq!(state.view().rows[0].title, "second");
        assert_eq!(persisted(&storage).unwrap().len(), 2);
    }

    #[test]
    fn test_add_whitespace_only_is_noop() {
        let (mut state, storage) = new_state();
        add_task(&mut state, "   ");

        assert_eq!(state.view().total_count, 0);
        // Nothing was ever persisted.
        assert!(persisted(&storage).is_none());
    }

    #[test]
    fn test_add_keeps_entry_field_open() {
        let (mut state, _storage) = new_state();
        state.start_add();
        state.input.set("task");
        state.submit_add();
        assert_eq!(*state.mode(), Mode::AddInput);
        assert!(state.input().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_original_flag() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "task");
        let before = state.tasks().tasks()[0].clone();

        state.toggle_selected();
        assert!(state.tasks().tasks()[0].done);
        state.toggle_selected();
        assert_eq!(state.tasks().tasks()[0], before);
    }

    #[test]
    fn test_toggle_unknown_id_still_persists() {
        let (mut state, storage) = new_state();
        add_task(&mut state, "task");
        let before = persisted(&storage).unwrap();

        state.toggle_done("no-such-id");
        assert_eq!(persisted(&storage).unwrap(), before);
        assert_eq!(state.view().total_count, 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "doomed");
        state.request_delete_selected();
        assert!(matches!(state.modal(), Some(Modal::ConfirmDelete(_))));

        // Declining leaves the list untouched.
        state.dismiss_modal();
        assert!(state.modal().is_none());
        assert_eq!(state.view().total_count, 1);

        // Confirming removes the task.
        state.request_delete_selected();
        state.confirm_modal();
        assert!(state.modal().is_none());
        assert_eq!(state.view().total_count, 0);
    }

    #[test]
    fn test_edit_title_commits_trimmed_value() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "old title");
        state.start_edit_selected();
        assert_eq!(*state.mode(), Mode::EditInput);
        assert_eq!(state.input().text(), "old title");
        assert_eq!(state.input().cursor(), "old title".chars().count());

        state.input.set("  new title ");
        state.commit_edit();
        assert_eq!(*state.mode(), Mode::Normal);
        assert_eq!(state.view().rows[0].title, "new title");
    }

    #[test]
    fn test_edit_title_to_empty_removes_task() {
        let (mut state, storage) = new_state();
        add_task(&mut state, "doomed");
        state.start_edit_selected();
        state.input.set("   ");
        state.commit_edit();

        assert_eq!(state.view().total_count, 0);
        assert!(persisted(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_cancel_edit_discards_changes() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "unchanged");
        state.start_edit_selected();
        state.input.set("scratch");
        state.cancel_edit();

        assert_eq!(*state.mode(), Mode::Normal);
        assert_eq!(state.view().rows[0].title, "unchanged");
    }

    #[test]
    fn test_clear_completed_empties_completed_view() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "one");
        add_task(&mut state, "two");
        state.toggle_selected();

        state.clear_completed();
        state.set_filter(Filter::Completed);
        assert!(state.view().rows.is_empty());
        assert_eq!(state.view().total_count, 1);
    }

    #[test]
    fn test_set_filter_does_not_touch_storage() {
        let (mut state, storage) = new_state();
        add_task(&mut state, "task");
        let before = persisted(&storage).unwrap();

        state.set_filter(Filter::Completed);
        assert!(state.view().rows.is_empty());
        assert_eq!(persisted(&storage).unwrap(), before);
        assert_eq!(state.filter(), Filter::Completed);
    }

    #[test]
    fn test_selection_clamps_to_visible_rows() {
        let (mut state, _storage) = new_state();
        add_task(&mut state, "one");
        add_task(&mut state, "two");
        add_task(&mut state, "three");
        state.next_row();
        state.next_row();
        assert_eq!(state.selected(), 2);
        state.next_row();
        assert_eq!(state.selected(), 2);

        // Deleting the last row pulls the selection back in range.
        state.request_delete_selected();
        state.confirm_modal();
        assert_eq!(state.selected(), 1);

        state.previous_row();
        state.previous_row();
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn test_export_then_import_reproduces_list() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MemoryStorage::new();
        let store = Store::new(Box::new(storage.clone()));
        let mut state = State::new(store, dir.path().to_path_buf());
        add_task(&mut state, "keep me");
        add_task(&mut state, "me too");
        state.toggle_selected();
        let before = state.tasks().clone();

        state.export();
        let export_path = dir.path().join("todos.json");
        assert!(export_path.exists());

        state.start_import();
        state.input.set(export_path.to_str().unwrap());
        state.submit_import();

        assert!(state.modal().is_none());
        assert_eq!(*state.tasks(), before);
    }

    #[test]
    fn test_import_non_array_alerts_and_preserves_list() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"id": "1", "title": "object"}"#).unwrap();

        let (mut state, _storage) = new_state();
        add_task(&mut state, "survivor");
        state.start_import();
        state.input.set(bad.to_str().unwrap());
        state.submit_import();

        match state.modal() {
            Some(Modal::Alert(message)) => {
                assert!(message.contains("Failed to import JSON"));
            }
            other => panic!("expected alert modal, got {:?}", other),
        }
        assert_eq!(state.view().total_count, 1);
        assert_eq!(state.view().rows[0].title, "survivor");

        state.confirm_modal();
        assert!(state.modal().is_none());
    }

    #[test]
    fn test_import_missing_file_alerts() {
        let (mut state, _storage) = new_state();
        state.start_import();
        state.input.set(Path::new("/no/such/import.json").to_str().unwrap());
        state.submit_import();
        assert!(matches!(state.modal(), Some(Modal::Alert(_))));
    }

    #[test]
    fn test_input_buffer_cursor_movement() {
        let mut input = InputBuffer::default();
        input.set("ab");
        input.insert('c');
        assert_eq!(input.text(), "abc");
        input.move_left();
        input.move_left();
        input.insert('x');
        assert_eq!(input.text(), "axbc");
        input.backspace();
        assert_eq!(input.text(), "abc");
        input.move_right();
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_state_starts_from_persisted_list() {
        let storage = MemoryStorage::new();
        {
            let store = Store::new(Box::new(storage.clone()));
            let mut state = State::new(store, PathBuf::from("/tmp"));
            add_task(&mut state, "persisted");
        }
        let store = Store::new(Box::new(storage));
        let state = State::new(store, PathBuf::from("/tmp"));
        assert_eq!(state.view().total_count, 1);
        assert_eq!(state.view().rows[0].title, "persisted");
        assert_eq!(state.filter(), Filter::All);
    }
}
