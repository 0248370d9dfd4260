use std::cell::RefCell;
use std::collections::VecDeque;

use crate::model::{AccountSnapshot, ChatMessage, DropEvent, Session, Task, UserStats};
use crate::remote::{Operation, Outcome, RemoteClient, RemoteError};

/// Remote that replays canned outcomes and records every operation
pub struct ScriptedRemote {
    responses: RefCell<VecDeque<Result<Outcome, RemoteError>>>,
    fallback: Option<UserStats>,
    calls: RefCell<Vec<Operation>>,
    pub snapshot: AccountSnapshot,
    /// Party chat to return; `None` answers like an account without a party
    pub chat: Option<Vec<ChatMessage>>,
}

impl ScriptedRemote {
    pub fn new(responses: Vec<Result<Outcome, RemoteError>>) -> Self {
        ScriptedRemote {
            responses: RefCell::new(responses.into()),
            fallback: None,
            calls: RefCell::new(Vec::new()),
            snapshot: AccountSnapshot::default(),
            chat: Some(Vec::new()),
        }
    }

    /// Every operation succeeds with the same statistics
    pub fn always(stats: UserStats) -> Self {
        let mut remote = ScriptedRemote::new(vec![]);
        remote.fallback = Some(stats);
        remote
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.borrow().clone()
    }
}

impl RemoteClient for ScriptedRemote {
    fn fetch_user_and_tasks(&self) -> Result<AccountSnapshot, RemoteError> {
        Ok(self.snapshot.clone())
    }

    fn execute(&self, op: &Operation) -> Result<Outcome, RemoteError> {
        self.calls.borrow_mut().push(op.clone());
        if let Some(next) = self.responses.borrow_mut().pop_front() {
            return next;
        }
        match self.fallback {
            Some(stats) => Ok(outcome(stats)),
            None => Err(RemoteError::Transport("no scripted response".into())),
        }
    }

    fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, RemoteError> {
        self.chat.clone().ok_or_else(|| RemoteError::Status {
            code: 404,
            body: "Group not found.".into(),
        })
    }
}

pub fn stats(hp: f64, gp: f64, mp: f64, exp: f64, lvl: i64) -> UserStats {
    UserStats {
        hp,
        max_health: 50.0,
        mp,
        max_mp: 30.0,
        gp,
        exp,
        to_next_level: 100.0,
        lvl,
    }
}

pub fn outcome(stats: UserStats) -> Outcome {
    Outcome {
        stats: Some(stats),
        drop: None,
    }
}

pub fn outcome_with_drop(stats: UserStats, text: &str) -> Outcome {
    Outcome {
        stats: Some(stats),
        drop: Some(DropEvent(text.to_string())),
    }
}

pub fn session_with(tasks: Vec<Task>) -> Session {
    Session::from_snapshot(AccountSnapshot {
        stats: stats(50.0, 10.0, 10.0, 25.0, 3),
        tasks,
    })
}

pub fn chat_message(author: &str, text: &str) -> ChatMessage {
    ChatMessage {
        author: Some(author.to_string()),
        text: text.to_string(),
        sent: None,
    }
}
