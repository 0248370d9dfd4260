use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::PendingEdit;
use crate::tui::app::{App, Mode};

/// Inline title editor. Enter stores the draft; Esc leaves the previous
/// draft in place, or unstages the edit when there was none.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => confirm_edit(app),
        (_, KeyCode::Esc) => cancel_edit(app),
        (_, KeyCode::Backspace) => {
            app.edit_buffer.pop();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.edit_buffer.clear(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.edit_buffer.push(c),
        _ => {}
    }
}

fn confirm_edit(app: &mut App) {
    let Some(id) = app.edit_target.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    let title = app.edit_buffer.trim().to_string();
    let unchanged = app.session.find(&id).is_none_or(|t| t.title == title);
    if title.is_empty() || unchanged {
        unstage(app, &id);
    } else {
        app.session.set_draft(&id, title);
    }
    finish(app);
}

fn cancel_edit(app: &mut App) {
    if let Some(id) = app.edit_target.take()
        && !app.session.drafts.contains_key(&id)
    {
        unstage(app, &id);
    }
    finish(app);
}

fn unstage(app: &mut App, id: &str) {
    app.session.drafts.remove(id);
    if let Some(task) = app.session.find_mut(id)
        && task.pending == PendingEdit::Edit
    {
        task.clear_pending();
    }
}

fn finish(app: &mut App) {
    app.edit_buffer.clear();
    app.mode = Mode::Navigate;
}
