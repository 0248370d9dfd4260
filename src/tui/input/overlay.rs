use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// An open overlay intercepts all input until dismissed
pub(super) fn handle_overlay(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        app.close_overlay();
        return;
    }
    let Some(overlay) = app.overlay.as_mut() else {
        app.close_overlay();
        return;
    };
    let last = overlay.entries.len().saturating_sub(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => overlay.scroll = (overlay.scroll + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => overlay.scroll = overlay.scroll.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => overlay.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => overlay.scroll = last,
        _ => {}
    }
}
