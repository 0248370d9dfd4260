use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pending::{PendingEdit, StateError, Toggle};

/// Which menu a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Habit,
    Daily,
    Todo,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::Habit, TaskKind::Daily, TaskKind::Todo];

    /// Title used for the menu holding tasks of this kind
    pub fn menu_title(self) -> &'static str {
        match self {
            TaskKind::Habit => "Habits",
            TaskKind::Daily => "Dailies",
            TaskKind::Todo => "TODOs",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Habit => write!(f, "habit"),
            TaskKind::Daily => write!(f, "daily"),
            TaskKind::Todo => write!(f, "todo"),
        }
    }
}

/// Scoring directions a habit was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
}

impl Directions {
    pub fn both() -> Self {
        Directions { up: true, down: true }
    }
}

/// Checklist progress as (done, total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub done: usize,
    pub total: usize,
}

/// One habit, daily or to-do as reported by the server.
///
/// `kind` and `directions` are fixed at construction. Everything else is
/// replaced wholesale when the session reloads from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, never reused
    pub id: String,
    kind: TaskKind,
    /// Display text
    pub title: String,
    /// Free-form notes shown under the title
    #[serde(default)]
    pub notes: String,
    /// Meaningful for dailies and to-dos only
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub checklist: Option<Checklist>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    directions: Directions,

    /// Locally staged action, not part of the server payload
    #[serde(skip)]
    pub pending: PendingEdit,
}

impl Task {
    pub fn new(id: impl Into<String>, kind: TaskKind, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            kind,
            title: title.into(),
            notes: String::new(),
            completed: false,
            checklist: None,
            due_date: None,
            directions: Directions::default(),
            pending: PendingEdit::None,
        }
    }

    /// Create a habit scoring in the given directions
    pub fn habit(id: impl Into<String>, title: impl Into<String>, directions: Directions) -> Self {
        let mut task = Task::new(id, TaskKind::Habit, title);
        task.directions = directions;
        task
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    /// Apply a toggle to the staged action. Rejected toggles leave the
    /// state untouched and return `false`.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        match self.try_toggle(toggle) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(task = %self.id, error = %e, "toggle rejected");
                false
            }
        }
    }

    /// Like [`Task::toggle`] but reports why a toggle was rejected.
    pub fn try_toggle(&mut self, toggle: Toggle) -> Result<PendingEdit, StateError> {
        let next = self.pending.apply(toggle, self.kind, self.directions)?;
        self.pending = next;
        Ok(next)
    }

    pub fn toggle_mark_up(&mut self) -> bool {
        self.toggle(Toggle::MarkUp)
    }

    pub fn toggle_mark_down(&mut self) -> bool {
        self.toggle(Toggle::MarkDown)
    }

    pub fn toggle_complete(&mut self) -> bool {
        self.toggle(Toggle::Complete)
    }

    pub fn toggle_delete(&mut self) -> bool {
        self.toggle(Toggle::Delete)
    }

    pub fn toggle_edit(&mut self) -> bool {
        self.toggle(Toggle::Edit)
    }

    /// Reset the staged action to `None`
    pub fn clear_pending(&mut self) {
        self.pending = PendingEdit::None;
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.title == other.title
            && self.notes == other.notes
            && self.completed == other.completed
            && self.checklist == other.checklist
            && self.due_date == other.due_date
            && self.directions == other.directions
    }
}

impl Eq for Task {}
