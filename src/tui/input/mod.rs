mod edit;
mod navigate;
mod overlay;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use edit::handle_edit;
use navigate::handle_navigate;
use overlay::handle_overlay;

/// Work the event loop has to do with the remote after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Flush,
    Reload,
    /// Fetch and show the party chat
    Party,
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Request> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::EditTitle => {
            handle_edit(app, key);
            None
        }
        Mode::Overlay => {
            handle_overlay(app, key);
            None
        }
    }
}
