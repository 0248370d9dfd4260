pub mod habitica;
mod wire;

use std::fmt;

use crate::model::{AccountSnapshot, ChatMessage, DropEvent, UserStats};

pub use habitica::HabiticaClient;

/// A single remote mutation issued during a sync cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Positive progress on a habit, daily or to-do
    ScoreUp { task_id: String },
    /// Negative habit progress, or undoing a completed daily
    ScoreDown { task_id: String },
    Delete { task_id: String },
    /// Replace the task title with a draft supplied by the UI
    Update { task_id: String, title: String },
}

impl Operation {
    pub fn task_id(&self) -> &str {
        match self {
            Operation::ScoreUp { task_id }
            | Operation::ScoreDown { task_id }
            | Operation::Delete { task_id }
            | Operation::Update { task_id, .. } => task_id,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ScoreUp { task_id } => write!(f, "score up {task_id}"),
            Operation::ScoreDown { task_id } => write!(f, "score down {task_id}"),
            Operation::Delete { task_id } => write!(f, "delete {task_id}"),
            Operation::Update { task_id, .. } => write!(f, "update {task_id}"),
        }
    }
}

/// Result of one successful remote operation
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// User statistics after the operation. `None` when the operation was
    /// applied but the statistics could not be read back.
    pub stats: Option<UserStats>,
    pub drop: Option<DropEvent>,
}

/// Any outcome other than success from the remote service
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("server returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("server rejected request: {0}")]
    Rejected(String),
}

/// The network side of the client.
///
/// Calls are blocking. Timeouts are the implementation's concern.
pub trait RemoteClient {
    /// Fetch user statistics and every habit, daily and open to-do
    fn fetch_user_and_tasks(&self) -> Result<AccountSnapshot, RemoteError>;

    /// Perform one operation and report the resulting statistics
    fn execute(&self, op: &Operation) -> Result<Outcome, RemoteError>;

    /// Recent party chat messages, newest first
    fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, RemoteError>;
}

impl<T: RemoteClient + ?Sized> RemoteClient for &T {
    fn fetch_user_and_tasks(&self) -> Result<AccountSnapshot, RemoteError> {
        (**self).fetch_user_and_tasks()
    }

    fn execute(&self, op: &Operation) -> Result<Outcome, RemoteError> {
        (**self).execute(op)
    }

    fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, RemoteError> {
        (**self).fetch_party_chat()
    }
}
