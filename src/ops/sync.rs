use chrono::Local;
use serde::Serialize;

use crate::model::{
    DropEvent, PendingEdit, Session, StatDelta, StatSnapshot, TaskKind, UserStats,
};
use crate::remote::{Operation, RemoteClient, RemoteError};

/// Error that stops a sync cycle
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{op} failed: {source}")]
    Transport {
        op: Operation,
        #[source]
        source: RemoteError,
    },
    #[error("{kind} task {id} is no longer in its menu")]
    Reconciliation { id: String, kind: TaskKind },
}

/// What one sync cycle produced
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Change in user statistics since the cycle started
    pub delta: StatDelta,
    /// Drop messages in the order they were received
    pub drops: Vec<DropEvent>,
    /// Remote operations that succeeded
    pub operations: usize,
}

/// A cycle that stopped early. Work done before the failure stays applied
/// and is described by `report`.
#[derive(Debug, thiserror::Error)]
#[error("sync stopped after {} operation(s): {error}", .report.operations)]
pub struct SyncFailure {
    pub report: SyncReport,
    #[source]
    pub error: SyncError,
}

/// Staged actions are drained one category at a time, in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    MarkUp,
    MarkDown,
    Complete,
    Delete,
    Edit,
}

impl Phase {
    pub const ORDER: [Phase; 5] = [
        Phase::MarkUp,
        Phase::MarkDown,
        Phase::Complete,
        Phase::Delete,
        Phase::Edit,
    ];

    fn pending(self) -> PendingEdit {
        match self {
            Phase::MarkUp => PendingEdit::MarkUp,
            Phase::MarkDown => PendingEdit::MarkDown,
            Phase::Complete => PendingEdit::Complete,
            Phase::Delete => PendingEdit::Delete,
            Phase::Edit => PendingEdit::Edit,
        }
    }
}

/// A task waiting in a phase queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedItem {
    pub kind: TaskKind,
    pub id: String,
}

/// Tasks staged for `phase`, habits first, then dailies, then to-dos
pub fn queue(session: &Session, phase: Phase) -> Vec<StagedItem> {
    TaskKind::ALL
        .iter()
        .flat_map(|kind| {
            session
                .collection(*kind)
                .staged(phase.pending())
                .into_iter()
                .map(move |id| StagedItem { kind: *kind, id })
        })
        .collect()
}

/// Running state of one cycle
struct Cycle<'a> {
    remote: &'a dyn RemoteClient,
    /// Statistics the next delta is measured from
    baseline: StatSnapshot,
    latest: Option<UserStats>,
    report: SyncReport,
}

impl<'a> Cycle<'a> {
    fn new(remote: &'a dyn RemoteClient, start: StatSnapshot) -> Self {
        Cycle {
            remote,
            baseline: start,
            latest: None,
            report: SyncReport::default(),
        }
    }

    fn execute(&mut self, op: Operation) -> Result<(), SyncError> {
        let outcome = match self.remote.execute(&op) {
            Ok(outcome) => outcome,
            Err(source) => {
                tracing::warn!(%op, error = %source, "remote operation failed");
                return Err(SyncError::Transport { op, source });
            }
        };
        match outcome.stats {
            Some(stats) => {
                let after = stats.snapshot();
                self.report.delta += StatDelta::between(self.baseline, after);
                self.baseline = after;
                self.latest = Some(stats);
            }
            None => tracing::warn!(%op, "applied without statistics, delta not counted"),
        }
        if let Some(drop) = outcome.drop {
            tracing::info!(%op, drop = %drop, "drop received");
            self.report.drops.push(drop);
        }
        self.report.operations += 1;
        tracing::debug!(%op, "remote operation applied");
        Ok(())
    }
}

fn missing(item: &StagedItem) -> SyncError {
    SyncError::Reconciliation {
        id: item.id.clone(),
        kind: item.kind,
    }
}

/// Issue one remote operation per staged action and reconcile the session.
///
/// Phases run in [`Phase::ORDER`]. The first failure stops the cycle:
/// operations that already succeeded stay applied (their tasks are
/// unstaged and their deltas reported), everything after stays staged.
pub fn flush(session: &mut Session, remote: &dyn RemoteClient) -> Result<SyncReport, SyncFailure> {
    let mut cycle = Cycle::new(remote, session.stats.snapshot());

    let mut result = Ok(());
    for phase in Phase::ORDER {
        result = run_phase(phase, session, &mut cycle);
        if result.is_err() {
            break;
        }
    }

    if let Some(stats) = cycle.latest {
        session.stats = stats;
    }
    if cycle.report.operations > 0 {
        session.last_update = Some(Local::now());
    }

    let mut report = cycle.report;
    report.delta = report.delta.finalize();
    match result {
        Ok(()) => {
            tracing::info!(operations = report.operations, delta = %report.delta, "sync complete");
            Ok(report)
        }
        Err(error) => {
            tracing::error!(operations = report.operations, error = %error, "sync aborted");
            Err(SyncFailure { report, error })
        }
    }
}

fn run_phase(phase: Phase, session: &mut Session, cycle: &mut Cycle) -> Result<(), SyncError> {
    let items = queue(session, phase);
    if items.is_empty() {
        return Ok(());
    }
    tracing::debug!(?phase, items = items.len(), "sync phase");
    for item in &items {
        process(phase, item, session, cycle)?;
        if let Some(task) = session.collection_mut(item.kind).get_mut(&item.id) {
            task.clear_pending();
        }
    }
    Ok(())
}

fn process(
    phase: Phase,
    item: &StagedItem,
    session: &mut Session,
    cycle: &mut Cycle,
) -> Result<(), SyncError> {
    let task_id = item.id.clone();
    match phase {
        Phase::MarkUp => cycle.execute(Operation::ScoreUp { task_id }),
        Phase::MarkDown => cycle.execute(Operation::ScoreDown { task_id }),
        Phase::Complete => {
            let task = session
                .collection(item.kind)
                .get(&item.id)
                .ok_or_else(|| missing(item))?;
            // A completed daily is un-completed, decided when drained
            let op = if item.kind == TaskKind::Daily && task.completed {
                Operation::ScoreDown { task_id }
            } else {
                Operation::ScoreUp { task_id }
            };
            cycle.execute(op)?;
            match item.kind {
                TaskKind::Todo => {
                    session.todos.remove(&item.id).ok_or_else(|| missing(item))?;
                }
                TaskKind::Daily => {
                    session
                        .dailies
                        .toggle_completed_in_place(&item.id)
                        .ok_or_else(|| missing(item))?;
                }
                TaskKind::Habit => {}
            }
            Ok(())
        }
        Phase::Delete => {
            cycle.execute(Operation::Delete { task_id })?;
            session
                .collection_mut(item.kind)
                .remove(&item.id)
                .ok_or_else(|| missing(item))?;
            session.drafts.remove(&item.id);
            Ok(())
        }
        Phase::Edit => {
            let Some(title) = session.drafts.get(&item.id).cloned() else {
                tracing::debug!(id = %item.id, "edit staged without a draft");
                return Ok(());
            };
            cycle.execute(Operation::Update {
                task_id,
                title: title.clone(),
            })?;
            let task = session
                .collection_mut(item.kind)
                .get_mut(&item.id)
                .ok_or_else(|| missing(item))?;
            task.title = title;
            session.drafts.remove(&item.id);
            Ok(())
        }
    }
}
