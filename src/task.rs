//! Task data structure.
//!
//! A task is the only persisted entity: a short title, free-text notes and a
//! completion flag, identified by a numeric id that never changes.

use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// The JSON form is `{ "id", "text", "description", "completed" }`, which is
/// also the element shape of the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an open task with empty notes.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            description: String::new(),
            completed: false,
        }
    }

    /// Label for the completion action shown in the detail view.
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Undo"
        } else {
            "Mark as Done"
        }
    }
}
