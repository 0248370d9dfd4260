use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{PendingEdit, TaskKind, Toggle};
use crate::tui::app::{App, Mode, Status};

use super::Request;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> Option<Request> {
    let code = key.code;
    if !matches!(code, KeyCode::Char('q')) {
        app.quit_armed = false;
    }

    match code {
        KeyCode::Char('q') => request_quit(app),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.set_cursor(0),
        KeyCode::Char('G') | KeyCode::End => {
            let len = app.session.collection(app.menu).len();
            app.set_cursor(len.saturating_sub(1));
        }
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => switch_menu(app, 1),
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => switch_menu(app, -1),
        KeyCode::Char('+') => stage(app, Toggle::MarkUp),
        KeyCode::Char('-') => stage(app, Toggle::MarkDown),
        KeyCode::Char(' ') | KeyCode::Char('c') => stage(app, Toggle::Complete),
        KeyCode::Char('d') => stage(app, Toggle::Delete),
        KeyCode::Char('e') => begin_edit(app),
        KeyCode::Char('w') => return Some(Request::Flush),
        KeyCode::Char('r') => return Some(Request::Reload),
        KeyCode::Char('p') => return Some(Request::Party),
        _ => {}
    }
    None
}

fn request_quit(app: &mut App) {
    let staged = app.session.staged_count();
    if staged == 0 || app.quit_armed {
        app.should_quit = true;
        return;
    }
    app.quit_armed = true;
    app.status = Some(Status::Info(format!(
        "{} staged change(s) not synced, q again to quit",
        staged
    )));
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.session.collection(app.menu).len();
    if len == 0 {
        return;
    }
    let next = app.cursor().saturating_add_signed(delta).min(len - 1);
    app.set_cursor(next);
}

fn switch_menu(app: &mut App, delta: isize) {
    let all = TaskKind::ALL;
    let current = all.iter().position(|k| *k == app.menu).unwrap_or(0);
    let next = (current as isize + delta).rem_euclid(all.len() as isize) as usize;
    app.menu = all[next];
}

/// Rejected toggles leave the task as it was
fn stage(app: &mut App, toggle: Toggle) {
    if let Some(id) = app.current_task().map(|task| task.id.clone()) {
        app.session.toggle(&id, toggle);
    }
}

/// `e` stages an edit and opens the title editor; on a task that already
/// has an edit staged it unstages it and drops the draft.
fn begin_edit(app: &mut App) {
    let Some(task) = app.current_task_mut() else {
        return;
    };
    if !task.toggle_edit() {
        return;
    }
    let id = task.id.clone();
    let title = task.title.clone();
    if task.pending != PendingEdit::Edit {
        app.session.drafts.remove(&id);
        return;
    }
    app.edit_buffer = app.session.drafts.get(&id).cloned().unwrap_or(title);
    app.edit_target = Some(id);
    app.mode = Mode::EditTitle;
}
