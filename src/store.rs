//! The task collection and its mutators.
//!
//! `TaskStore` owns the authoritative list of tasks in insertion order and
//! writes the whole collection back to storage after every successful
//! mutation. Unknown ids and empty titles are silent no-ops.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};
use crate::task::Task;

/// Storage key holding the serialized collection.
pub const TASKS_KEY: &str = "todo-tasks";

/// Errors raised by task mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist tasks: {0}")]
    Persist(#[from] StorageError),
}

/// Whether the caller should move to the list view after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    ToList,
}

/// In-memory task collection backed by a key-value store.
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Hydrate the collection from storage.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => sanitize(tasks),
                Err(e) => {
                    warn!(error = %e, "stored tasks are malformed, starting fresh");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored tasks, starting fresh");
                Vec::new()
            }
        };
        debug!(count = tasks.len(), "loaded tasks");
        TaskStore { tasks, storage }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Next id: the current time in milliseconds, bumped past every existing id.
    ///
    /// Once `u64::MAX` is taken the smallest unused id is handed out instead.
    fn next_id(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if now <= max => max.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
            _ => now,
        }
    }

    fn lowest_free_id(&self) -> u64 {
        let used: HashSet<u64> = self.tasks.iter().map(|t| t.id).collect();
        (0..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(0)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let data = serde_json::to_string(&self.tasks).map_err(StorageError::from)?;
        self.storage.set(TASKS_KEY, &data)?;
        Ok(())
    }

    /// Append a task titled `text`. Blank titles are ignored.
    pub fn add(&mut self, text: &str) -> Result<&[Task], StoreError> {
        if text.trim().is_empty() {
            return Ok(&self.tasks);
        }
        let task = Task::new(self.next_id(), text);
        debug!(id = task.id, "adding task");
        self.tasks.push(task);
        self.persist()?;
        Ok(&self.tasks)
    }

    /// Flip the completion flag of task `id`.
    pub fn toggle_complete(&mut self, id: u64) -> Result<&[Task], StoreError> {
        let Some(task) = self.get_mut(id) else {
            return Ok(&self.tasks);
        };
        task.completed = !task.completed;
        debug!(id, completed = task.completed, "toggled task");
        self.persist()?;
        Ok(&self.tasks)
    }

    /// Replace the notes of task `id` verbatim.
    pub fn set_description(&mut self, id: u64, text: &str) -> Result<&[Task], StoreError> {
        let Some(task) = self.get_mut(id) else {
            return Ok(&self.tasks);
        };
        task.description = text.to_string();
        self.persist()?;
        Ok(&self.tasks)
    }

    /// Remove task `id`. Always asks the caller to return to the list.
    pub fn delete(&mut self, id: u64) -> Result<(&[Task], Navigation), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(id, "deleted task");
        }
        self.persist()?;
        Ok((&self.tasks, Navigation::ToList))
    }
}

/// Drop stored entries with a blank title or an id already seen.
fn sanitize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let before = tasks.len();
    let kept: Vec<Task> = tasks
        .into_iter()
        .filter(|t| !t.text.trim().is_empty() && seen.insert(t.id))
        .collect();
    if kept.len() != before {
        warn!(dropped = before - kept.len(), "stored tasks had blank titles or duplicate ids");
    }
    kept
}
