// File: ./src/model/item.rs
// The task record itself
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do entry. The list is persisted wholesale, so this struct is
/// exactly the shape of one record in `todos.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque id, assigned once at creation and stable for the task's life.
    pub id: String,
    /// Display text. Unique across the list (exact match, case-sensitive).
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Edit-mode flag. Transient UI state, but the stored record carries it
    /// as-is, so a reload brings rows back mid-edit.
    #[serde(default)]
    pub editing: bool,
}

impl Task {
    pub fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            editing: false,
        }
    }
}
