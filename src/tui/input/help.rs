use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::tui::render::help_overlay::help_line_count;

pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    let page = app.page_size.max(1);
    let max_scroll = help_line_count().saturating_sub(page);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | 'h' | '?') => app.set_mode(Mode::List),
        KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        KeyCode::Down => app.help_scroll = (app.help_scroll + 1).min(max_scroll),
        KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(page),
        KeyCode::PageDown => app.help_scroll = (app.help_scroll + page).min(max_scroll),
        _ => {}
    }
}
