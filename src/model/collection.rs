use indexmap::IndexMap;

use super::pending::PendingEdit;
use super::task::{Task, TaskKind};

/// Ordered tasks of a single kind, keyed by id.
///
/// Iteration follows the order tasks arrived from the server. Removal keeps
/// the relative order of the remaining tasks.
#[derive(Debug, Clone)]
pub struct TaskCollection {
    kind: TaskKind,
    tasks: IndexMap<String, Task>,
}

impl TaskCollection {
    pub fn new(kind: TaskKind) -> Self {
        TaskCollection {
            kind,
            tasks: IndexMap::new(),
        }
    }

    /// Build a collection from fetched tasks. Tasks of another kind are
    /// skipped and a repeated id keeps its first position.
    pub fn from_tasks(kind: TaskKind, tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut collection = TaskCollection::new(kind);
        collection.replace_all(tasks);
        collection
    }

    /// Rebuild the collection wholesale (used after a full refetch)
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.clear();
        for task in tasks {
            if task.kind() != self.kind {
                tracing::warn!(id = %task.id, kind = %task.kind(), menu = %self.kind, "task kind mismatch, skipped");
                continue;
            }
            if self.tasks.contains_key(&task.id) {
                tracing::warn!(id = %task.id, "duplicate task id, skipped");
                continue;
            }
            self.tasks.insert(task.id.clone(), task);
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.values_mut()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// Task at a display position
    pub fn get_index(&self, index: usize) -> Option<&Task> {
        self.tasks.get_index(index).map(|(_, t)| t)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_index_mut(index).map(|(_, t)| t)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// Remove a task by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        self.tasks.shift_remove(id)
    }

    /// Flip `completed` without removing the task. Returns the new value,
    /// or `None` if the id is not present.
    pub fn toggle_completed_in_place(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.get_mut(id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Ids of tasks with the given staged action, in display order
    pub fn staged(&self, pending: PendingEdit) -> Vec<String> {
        self.tasks
            .values()
            .filter(|t| t.pending == pending)
            .map(|t| t.id.clone())
            .collect()
    }

    /// Number of tasks with anything staged
    pub fn staged_count(&self) -> usize {
        self.tasks.values().filter(|t| t.pending.is_staged()).count()
    }

    /// Reset every staged action to `None`
    pub fn clear_pending(&mut self) {
        for task in self.tasks.values_mut() {
            task.clear_pending();
        }
    }
}
