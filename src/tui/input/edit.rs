//! Search, AddNew and Rename: the key goes to the mode's editor, and the
//! returned outcome decides what happens to the list.

use chrono::Utc;
use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::model::Item;
use crate::ops::store::{Change, validate_name};
use crate::tui::app::{App, Mode};
use crate::tui::line_editor::EditAction;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let outcome = app.search_editor.handle(key);
    match outcome.action {
        Some(EditAction::Commit(text)) => {
            // The pattern stays in effect after leaving search
            app.set_pattern(&text);
            app.search_editor.set_value(&text);
            app.set_mode(Mode::List);
        }
        Some(EditAction::Cancel) => {
            app.set_pattern("");
            app.set_mode(Mode::List);
        }
        None if outcome.changed => {
            let text = app.search_editor.value().to_string();
            app.set_pattern(&text);
        }
        None => {}
    }
}

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match app.add_editor.handle(key).action {
        Some(EditAction::Commit(text)) => match validate_name(&text) {
            Ok(name) => {
                let item = Item::new(name, Utc::now());
                let position = app.config.behavior.add_position;
                let id = app.store.insert(item.clone(), position);
                info!(id = ?id, name, "added item");
                app.refresh();
                app.persist(Change::Insert { item, position });
                app.set_mode(Mode::List);
            }
            Err(e) => {
                debug!(error = %e, "add rejected");
                app.message = Some(e.to_string());
                app.add_editor.set_value(&text);
            }
        },
        Some(EditAction::Cancel) => app.set_mode(Mode::List),
        None => {}
    }
}

pub(super) fn handle_rename(app: &mut App, key: KeyEvent) {
    match app.rename_editor.handle(key).action {
        Some(EditAction::Commit(text)) => match validate_name(&text) {
            Ok(name) => {
                if let Some(id) = app.rename_target.take()
                    && let Some(item) = app.item(id).cloned()
                    && app.store.rename(id, name)
                {
                    info!(id = ?id, name, "renamed item");
                    app.refresh();
                    app.persist(Change::Rename {
                        item,
                        name: name.to_string(),
                    });
                }
                app.set_mode(Mode::List);
            }
            Err(e) => {
                debug!(error = %e, "rename rejected");
                app.message = Some(e.to_string());
                let original = app
                    .rename_target
                    .and_then(|id| app.item(id))
                    .map(|item| item.name.clone())
                    .unwrap_or_default();
                app.rename_editor.set_value(&original);
            }
        },
        Some(EditAction::Cancel) => {
            app.rename_target = None;
            app.set_mode(Mode::List);
        }
        None => {}
    }
}
