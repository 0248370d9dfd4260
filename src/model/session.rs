use std::collections::HashMap;

use chrono::{DateTime, Local};

use super::collection::TaskCollection;
use super::stats::{AttributeStats, UserStats};
use super::pending::{PendingEdit, Toggle};
use super::task::{Task, TaskKind};

/// User statistics and tasks as fetched from the server
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub stats: UserStats,
    pub tasks: Vec<Task>,
}

/// Error looking up a task by id or id prefix
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("ambiguous task id {prefix}: matches {}", .matches.join(", "))]
    Ambiguous { prefix: String, matches: Vec<String> },
}

/// Everything the client knows about the account between syncs.
///
/// One session is owned by the running front end (TUI or CLI handler) and
/// passed explicitly to the sync coordinator.
#[derive(Debug, Clone)]
pub struct Session {
    pub stats: UserStats,
    pub habits: TaskCollection,
    pub dailies: TaskCollection,
    pub todos: TaskCollection,
    /// Replacement titles for tasks with `Edit` staged
    pub drafts: HashMap<String, String>,
    /// Filled in by the background refresh; display only
    pub attributes: Option<AttributeStats>,
    /// When the session last matched the server
    pub last_update: Option<DateTime<Local>>,
}

impl Session {
    pub fn from_snapshot(snapshot: AccountSnapshot) -> Self {
        let mut session = Session {
            stats: UserStats::default(),
            habits: TaskCollection::new(TaskKind::Habit),
            dailies: TaskCollection::new(TaskKind::Daily),
            todos: TaskCollection::new(TaskKind::Todo),
            drafts: HashMap::new(),
            attributes: None,
            last_update: None,
        };
        session.apply_snapshot(snapshot);
        session
    }

    /// Replace statistics and every collection wholesale. Staged actions
    /// and drafts do not survive a reload.
    pub fn apply_snapshot(&mut self, snapshot: AccountSnapshot) {
        let mut habits = Vec::new();
        let mut dailies = Vec::new();
        let mut todos = Vec::new();
        for task in snapshot.tasks {
            match task.kind() {
                TaskKind::Habit => habits.push(task),
                TaskKind::Daily => dailies.push(task),
                TaskKind::Todo => todos.push(task),
            }
        }
        self.stats = snapshot.stats;
        self.habits.replace_all(habits);
        self.dailies.replace_all(dailies);
        self.todos.replace_all(todos);
        self.drafts.clear();
        self.last_update = Some(Local::now());
    }

    pub fn collection(&self, kind: TaskKind) -> &TaskCollection {
        match kind {
            TaskKind::Habit => &self.habits,
            TaskKind::Daily => &self.dailies,
            TaskKind::Todo => &self.todos,
        }
    }

    pub fn collection_mut(&mut self, kind: TaskKind) -> &mut TaskCollection {
        match kind {
            TaskKind::Habit => &mut self.habits,
            TaskKind::Daily => &mut self.dailies,
            TaskKind::Todo => &mut self.todos,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        TaskKind::ALL
            .iter()
            .find_map(|kind| self.collection(*kind).get(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        let kind = self.find(id)?.kind();
        self.collection_mut(kind).get_mut(id)
    }

    /// Resolve a full id or a unique id prefix
    pub fn resolve_id(&self, prefix: &str) -> Result<String, LookupError> {
        if self.find(prefix).is_some() {
            return Ok(prefix.to_string());
        }
        let matches: Vec<String> = TaskKind::ALL
            .iter()
            .flat_map(|kind| self.collection(*kind).iter())
            .filter(|t| t.id.starts_with(prefix))
            .map(|t| t.id.clone())
            .collect();
        match matches.len() {
            0 => Err(LookupError::NotFound(prefix.to_string())),
            1 => Ok(matches.into_iter().next().unwrap_or_default()),
            _ => Err(LookupError::Ambiguous {
                prefix: prefix.to_string(),
                matches,
            }),
        }
    }

    /// Apply a toggle to the task with `id`. A draft title only lives as
    /// long as its task has `Edit` staged.
    pub fn toggle(&mut self, id: &str, toggle: Toggle) -> bool {
        let Some(task) = self.find_mut(id) else {
            return false;
        };
        let applied = task.toggle(toggle);
        let editing = task.pending == PendingEdit::Edit;
        if !editing {
            self.drafts.remove(id);
        }
        applied
    }

    /// Store the replacement title for a task with `Edit` staged
    pub fn set_draft(&mut self, id: &str, title: String) {
        self.drafts.insert(id.to_string(), title);
    }

    /// Number of tasks with anything staged, across all menus
    pub fn staged_count(&self) -> usize {
        TaskKind::ALL
            .iter()
            .map(|kind| self.collection(*kind).staged_count())
            .sum()
    }
}
