mod common;
mod edit;
mod help;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use common::normalize_key;
use edit::{handle_add, handle_rename, handle_search};
use help::handle_help;
use list::handle_list;

/// Handle a key event in the current mode. Returns whether the screen
/// should be redrawn.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return false;
    }
    app.message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return true;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::List => handle_list(app, key),
        Mode::Search => handle_search(app, key),
        Mode::AddNew => handle_add(app, key),
        Mode::Rename => handle_rename(app, key),
        Mode::Help => handle_help(app, key),
    }
    true
}
