use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{ChatMessage, Checklist, PendingEdit, Session, Task, TaskKind, UserStats};
use crate::ops::SyncReport;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub kind: TaskKind,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Checklist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<bool>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub level: i64,
    pub health: i64,
    pub max_health: i64,
    pub experience: i64,
    pub to_next_level: i64,
    pub mana: i64,
    pub max_mana: i64,
    pub gold: i64,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    let habit = task.kind() == TaskKind::Habit;
    TaskJson {
        id: task.id.clone(),
        kind: task.kind(),
        title: task.title.clone(),
        notes: task.notes.clone(),
        completed: task.completed,
        checklist: task.checklist,
        due_date: task.due_date,
        up: habit.then(|| task.directions().up),
        down: habit.then(|| task.directions().down),
    }
}

pub fn stats_to_json(stats: &UserStats) -> StatsJson {
    let snap = stats.snapshot();
    StatsJson {
        level: snap.lvl,
        health: snap.hp,
        max_health: stats.max_health.round() as i64,
        experience: snap.exp,
        to_next_level: stats.to_next_level.round() as i64,
        mana: snap.mp,
        max_mana: stats.max_mp.round() as i64,
        gold: snap.gp,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Ids are long UUIDs; eight characters are enough to pick one
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// One task as a text line: `[x] 1a2b3c4d  Title (1/3) [15/04]`
pub fn format_task_line(task: &Task) -> String {
    let status = match task.kind() {
        TaskKind::Habit => {
            let d = task.directions();
            format!(
                "[{}{}]",
                if d.up { "+" } else { " " },
                if d.down { "-" } else { " " }
            )
        }
        _ if task.completed => "[x]".to_string(),
        _ => "[ ]".to_string(),
    };
    let mut line = format!("{} {}  {}", status, short_id(&task.id), task.title);
    if let Some(checklist) = task.checklist {
        line.push_str(&format!(" ({}/{})", checklist.done, checklist.total));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" {}", due.format("[%d/%m]")));
    }
    if task.pending != PendingEdit::None {
        line.push_str(&format!("  <{}>", task.pending));
    }
    line
}

pub fn format_menu(session: &Session, kind: TaskKind) -> String {
    let collection = session.collection(kind);
    let mut out = format!("{}\n", kind.menu_title());
    if collection.is_empty() {
        out.push_str("  (none)\n");
    }
    for task in collection.iter() {
        out.push_str("  ");
        out.push_str(&format_task_line(task));
        out.push('\n');
    }
    out
}

pub fn format_stats(stats: &UserStats) -> String {
    let j = stats_to_json(stats);
    format!(
        "lvl {}  hp {}/{}  exp {}/{}  mp {}/{}  gp {}\n",
        j.level, j.health, j.max_health, j.experience, j.to_next_level, j.mana, j.max_mana, j.gold
    )
}

pub fn format_report(report: &SyncReport) -> String {
    let mut out = format!("{}\n", report.delta);
    for drop in &report.drops {
        out.push_str(&format!("drop: {}\n", drop));
    }
    out
}

/// Party chat oldest first, so the newest message ends up last
pub fn format_chat(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return "no party chat messages\n".to_string();
    }
    let mut out = String::new();
    for message in messages.iter().rev() {
        out.push_str(&message.header());
        out.push('\n');
        for line in message.text.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
