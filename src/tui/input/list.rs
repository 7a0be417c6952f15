use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::ops::store::Change;
use crate::tui::app::{App, Mode};

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    let page = app.page_size.max(1) as isize;
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('f')) => enter_search(app),
        (_, KeyCode::Esc) => app.should_quit = true,
        (_, KeyCode::Tab) => enter_search(app),
        (_, KeyCode::Up) => {
            app.selection.move_selection(-1);
        }
        (_, KeyCode::Down) => {
            app.selection.move_selection(1);
        }
        (_, KeyCode::PageUp) => {
            app.selection.move_selection(-page);
        }
        (_, KeyCode::PageDown) => {
            app.selection.move_selection(page);
        }
        (_, KeyCode::Home) => app.selection.select_first(),
        (_, KeyCode::End) => app.selection.select_last(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => match c {
            'q' => app.should_quit = true,
            '/' => enter_search(app),
            'a' => enter_add(app),
            'A' | 'R' => enter_rename(app),
            'h' | '?' => {
                app.help_scroll = 0;
                app.set_mode(Mode::Help);
            }
            'd' => delete_current(app),
            'D' => delete_visible(app),
            'r' => restart_current(app),
            'k' => {
                app.selection.move_selection(-1);
            }
            'j' => {
                app.selection.move_selection(1);
            }
            'g' => app.selection.select_first(),
            'G' => app.selection.select_last(),
            _ => {}
        },
        _ => {}
    }
}

/// Search starts from the pattern already in effect
fn enter_search(app: &mut App) {
    let pattern = app.pattern().to_string();
    app.search_editor.set_value(&pattern);
    app.set_mode(Mode::Search);
}

fn enter_add(app: &mut App) {
    app.add_editor.clear();
    app.set_mode(Mode::AddNew);
}

/// Rename is bound to the item selected now, not whatever is selected at commit
fn enter_rename(app: &mut App) {
    let Some(id) = app.current() else {
        return;
    };
    let Some(name) = app.item(id).map(|item| item.name.clone()) else {
        return;
    };
    app.rename_editor.set_value(&name);
    app.rename_target = Some(id);
    app.set_mode(Mode::Rename);
}

/// Remove the selected item and select the one before it
fn delete_current(app: &mut App) {
    let (Some(id), Some(index)) = (app.current(), app.selection.index()) else {
        return;
    };
    let Some(item) = app.store.remove(id) else {
        return;
    };
    info!(name = %item.name, "deleted item");
    app.refresh_near(index.saturating_sub(1));
    app.persist(Change::Remove(vec![item]));
}

/// Remove everything the current pattern shows, then drop the pattern
fn delete_visible(app: &mut App) {
    let ids = app.filtered().to_vec();
    let items: Vec<_> = ids.iter().filter_map(|id| app.item(*id).cloned()).collect();
    let removed = app.store.remove_all(&ids);
    app.search_editor.clear();
    app.set_pattern("");
    app.refresh();
    if removed > 0 {
        info!(count = removed, "deleted visible items");
        app.persist(Change::Remove(items));
    }
}

fn restart_current(app: &mut App) {
    let Some((id, item)) = app.current().zip(app.current_item().cloned()) else {
        return;
    };
    let since = Utc::now();
    if app.store.restart(id, since) {
        info!(id = ?id, "restarted item");
        app.persist(Change::Restart { item, since });
    }
}
