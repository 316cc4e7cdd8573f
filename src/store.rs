use crate::model::Task;
use crate::storage::LocalStorage;
use log::{debug, warn};
use std::path::PathBuf;

/// Shown when an add or a rename collides with an existing task name.
pub const DUPLICATE_NOTICE: &str =
    "A todo with this name already exists. Please use another name!";

/// Owns the task list and every mutation of it.
///
/// Each mutating operation rebuilds the list as a fresh sequence and then
/// rewrites the slot in full, so "every list change persists synchronously"
/// is part of this type's contract rather than a side effect hidden in the
/// UI layer. The notice and the armed delete are controller state too: the
/// view renders its dialogs straight from them.
pub struct TodoList {
    tasks: Vec<Task>,
    notice: Option<String>,
    pending_delete: Option<String>,
    slot: Option<PathBuf>,
}

impl TodoList {
    /// Loads from a slot path and keeps writing back to it.
    pub fn open(slot: impl Into<PathBuf>) -> Self {
        let slot = slot.into();
        let tasks = LocalStorage::load(&slot);
        debug!("loaded {} task(s) from {}", tasks.len(), slot.display());
        Self {
            tasks,
            notice: None,
            pending_delete: None,
            slot: Some(slot),
        }
    }

    /// An empty list with no backing slot.
    pub fn detached() -> Self {
        Self {
            tasks: vec![],
            notice: None,
            pending_delete: None,
            slot: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Appends a new task, unless `text` matches an existing task's text
    /// exactly (case-sensitive, untrimmed; completed tasks count too). On a
    /// collision only the notice changes and nothing is written.
    pub fn add_task(&mut self, text: &str) -> bool {
        if self.tasks.iter().any(|t| t.text == text) {
            self.notice = Some(DUPLICATE_NOTICE.to_string());
            return false;
        }
        self.tasks.push(Task::new(text));
        debug!("added task ({} total)", self.tasks.len());
        self.persist();
        true
    }

    /// Arms the delete confirmation. The list itself is untouched until
    /// `confirm_delete`.
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    /// Removes the armed task. Safe no-op when nothing is armed or the id
    /// is already gone.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.tasks = std::mem::take(&mut self.tasks)
            .into_iter()
            .filter(|t| t.id != id)
            .collect();
        debug!("delete confirmed ({} left)", self.tasks.len());
        self.persist();
    }

    /// Disarms the delete confirmation without touching the list.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Flips `completed` on the matching task; unknown ids change nothing.
    pub fn toggle_complete(&mut self, id: &str) {
        self.replace(id, |t| Task {
            completed: !t.completed,
            ..t
        });
    }

    /// Flips `editing` on the matching task. A second call restores viewing
    /// mode without touching the text.
    pub fn toggle_edit(&mut self, id: &str) {
        self.replace(id, |t| Task {
            editing: !t.editing,
            ..t
        });
    }

    /// Renames the matching task and leaves edit mode. Rejected (notice set,
    /// nothing changed, nothing written) when `new_text` already belongs to
    /// a *different* task; re-submitting a task's current name is fine.
    pub fn submit_edit(&mut self, new_text: &str, id: &str) -> bool {
        if self.tasks.iter().any(|t| t.text == new_text && t.id != id) {
            self.notice = Some(DUPLICATE_NOTICE.to_string());
            return false;
        }
        self.replace(id, |t| Task {
            text: new_text.to_string(),
            editing: false,
            ..t
        });
        true
    }

    /// Clears the duplicate-name notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Rebuilds the list with `f` applied to the task matching `id`, then
    /// persists. A miss rewrites the list unchanged.
    fn replace(&mut self, id: &str, f: impl Fn(Task) -> Task) {
        self.tasks = std::mem::take(&mut self.tasks)
            .into_iter()
            .map(|t| if t.id == id { f(t) } else { t })
            .collect();
        self.persist();
    }

    /// Writes the whole list to the slot. Failures are logged and swallowed;
    /// the in-memory list stays authoritative for this run.
    fn persist(&self) {
        if let Some(slot) = &self.slot
            && let Err(e) = LocalStorage::save(slot, &self.tasks)
        {
            warn!("could not write {}: {e}", slot.display());
        }
    }
}
