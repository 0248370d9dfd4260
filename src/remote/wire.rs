//! JSON shapes of the Habitica v3 API and their conversion into the model.

use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    AttributeStats, ChatMessage, Checklist, Directions, DropEvent, Task, TaskKind, UserStats,
};

use super::RemoteError;

/// `{ "success": bool, "data": ..., "message": ... }`
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T, RemoteError> {
        if !self.success {
            let reason = self
                .message
                .or(self.error)
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(RemoteError::Rejected(reason));
        }
        self.data
            .ok_or_else(|| RemoteError::Decode("response has no data".into()))
    }

    /// For endpoints whose payload is not used
    pub fn ensure_success(self) -> Result<(), RemoteError> {
        if self.success {
            Ok(())
        } else {
            self.into_data().map(|_| ())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Buffs {
    #[serde(default, rename = "str")]
    pub strength: f64,
    #[serde(default, rename = "int")]
    pub intelligence: f64,
    #[serde(default, rename = "per")]
    pub perception: f64,
    #[serde(default, rename = "con")]
    pub constitution: f64,
}

/// The `stats` object; also the top level of a score response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireStats {
    pub hp: f64,
    #[serde(default)]
    pub max_health: f64,
    pub mp: f64,
    #[serde(rename = "maxMP", default)]
    pub max_mp: f64,
    pub gp: f64,
    pub exp: f64,
    #[serde(default)]
    pub to_next_level: f64,
    pub lvl: i64,
    #[serde(default, rename = "str")]
    pub strength: f64,
    #[serde(default, rename = "int")]
    pub intelligence: f64,
    #[serde(default, rename = "per")]
    pub perception: f64,
    #[serde(default, rename = "con")]
    pub constitution: f64,
    #[serde(default)]
    pub buffs: Buffs,
}

impl WireStats {
    pub fn user_stats(&self) -> UserStats {
        UserStats {
            hp: self.hp,
            max_health: self.max_health,
            mp: self.mp,
            max_mp: self.max_mp,
            gp: self.gp,
            exp: self.exp,
            to_next_level: self.to_next_level,
            lvl: self.lvl,
        }
    }

    /// Base attributes plus active buffs
    pub fn attributes(&self) -> AttributeStats {
        let sum = |base: f64, buff: f64| (base + buff).trunc() as i64;
        AttributeStats {
            strength: sum(self.strength, self.buffs.strength),
            intelligence: sum(self.intelligence, self.buffs.intelligence),
            perception: sum(self.perception, self.buffs.perception),
            constitution: sum(self.constitution, self.buffs.constitution),
        }
    }
}

/// `GET /user`
#[derive(Debug, Deserialize)]
pub(super) struct UserData {
    pub stats: WireStats,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChecklistItem {
    #[serde(default)]
    pub completed: bool,
}

/// One entry of `GET /tasks/user`. Tasks carry both `id` and `_id`;
/// older ones may only have `_id`.
#[derive(Debug, Deserialize)]
pub(super) struct WireTask {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "_id", default)]
    pub legacy_id: Option<String>,
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub up: Option<bool>,
    #[serde(default)]
    pub down: Option<bool>,
}

impl WireTask {
    /// Convert to a model task. Rewards and completed to-dos are not shown
    /// and yield `None`.
    pub fn into_task(self) -> Option<Task> {
        let Some(id) = self.id.or(self.legacy_id) else {
            tracing::warn!(text = %self.text, "skipping task without an id");
            return None;
        };
        let kind = match self.task_type.as_str() {
            "habit" => TaskKind::Habit,
            "daily" => TaskKind::Daily,
            "todo" => TaskKind::Todo,
            _ => return None,
        };
        if kind == TaskKind::Todo && self.completed {
            return None;
        }

        let mut task = match kind {
            TaskKind::Habit => Task::habit(
                id,
                self.text,
                Directions {
                    up: self.up.unwrap_or(true),
                    down: self.down.unwrap_or(true),
                },
            ),
            _ => Task::new(id, kind, self.text),
        };
        task.notes = self.notes;
        if kind != TaskKind::Habit {
            task.completed = self.completed;
        }
        if !self.checklist.is_empty() {
            task.checklist = Some(Checklist {
                done: self.checklist.iter().filter(|c| c.completed).count(),
                total: self.checklist.len(),
            });
        }
        task.due_date = self.date.as_deref().and_then(parse_due_date);
        Some(task)
    }
}

/// Due dates arrive as UTC timestamps; show them in local time.
pub(super) fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// One entry of `GET /groups/party/chat`
#[derive(Debug, Deserialize)]
pub(super) struct WireChatMessage {
    #[serde(default)]
    pub text: String,
    /// Display name; absent on system messages
    #[serde(default)]
    pub user: Option<String>,
    /// Milliseconds since the epoch or an RFC 3339 string
    #[serde(default)]
    pub timestamp: Value,
}

impl WireChatMessage {
    pub fn into_message(self) -> ChatMessage {
        ChatMessage {
            author: self.user.filter(|u| !u.is_empty()),
            text: self.text,
            sent: parse_timestamp(&self.timestamp),
        }
    }
}

fn parse_timestamp(raw: &Value) -> Option<DateTime<Local>> {
    match raw {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&Local))
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Local)),
        _ => None,
    }
}

/// `POST /tasks/{id}/score/{direction}`
#[derive(Debug, Deserialize)]
pub(super) struct ScoreData {
    #[serde(flatten)]
    pub stats: WireStats,
    #[serde(rename = "_tmp", default)]
    pub tmp: Value,
}

impl ScoreData {
    /// The drop message, preferring `dialog`, then `text`, then `notes`
    pub fn drop_event(&self) -> Option<DropEvent> {
        let drop = self.tmp.get("drop")?;
        ["dialog", "text", "notes"]
            .iter()
            .find_map(|key| drop.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(|s| DropEvent(s.to_string()))
    }
}
