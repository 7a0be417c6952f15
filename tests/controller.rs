//! Drives the interactive controller through its public entry point with a
//! real data file, the way the event loop does.

use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use timetrack::io::store_io::{JsonFile, Persistence, StoreError};
use timetrack::model::{Config, Item};
use timetrack::tui::app::{App, Mode};
use timetrack::tui::input::handle_key;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}

fn open(dir: &TempDir, names: &[&str]) -> (App, JsonFile) {
    let file = JsonFile::new(dir.path().join("items.json"));
    let since = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let items: Vec<Item> = names.iter().map(|n| Item::new(*n, since)).collect();
    file.save(&items).unwrap();
    let app = App::new(file.load().unwrap(), Config::default(), Box::new(file.clone()));
    (app, file)
}

fn on_disk(file: &JsonFile) -> Vec<String> {
    file.load().unwrap().into_iter().map(|i| i.name).collect()
}

fn visible(app: &App) -> Vec<String> {
    app.filtered()
        .iter()
        .map(|id| app.item(*id).unwrap().name.clone())
        .collect()
}

#[test]
fn filtered_view_and_selection_for_pattern() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &["x", "xy", "z"]);
    handle_key(&mut app, key(KeyCode::Char('/')));
    type_str(&mut app, "x");
    assert_eq!(visible(&app), vec!["x", "xy"]);
    assert_eq!(app.selection.index(), Some(0));
}

#[test]
fn edits_are_saved_as_they_happen() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["coffee", "gym"]);

    handle_key(&mut app, key(KeyCode::Char('a')));
    type_str(&mut app, "tea");
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(on_disk(&file), vec!["coffee", "gym", "tea"]);

    // Rename the selected (first) item
    handle_key(&mut app, key(KeyCode::Char('R')));
    assert_eq!(app.mode, Mode::Rename);
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
    type_str(&mut app, "espresso");
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(on_disk(&file), vec!["espresso", "gym", "tea"]);

    handle_key(&mut app, key(KeyCode::Char('j')));
    handle_key(&mut app, key(KeyCode::Char('d')));
    assert_eq!(on_disk(&file), vec!["espresso", "tea"]);
    assert_eq!(app.current_item().unwrap().name, "espresso");
}

#[test]
fn empty_add_does_not_touch_the_file() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["coffee"]);
    let before = std::fs::read_to_string(file.path()).unwrap();

    handle_key(&mut app, key(KeyCode::Char('a')));
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::AddNew);
    assert_eq!(visible(&app), vec!["coffee"]);
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), before);
}

#[test]
fn restart_survives_reload() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["coffee"]);
    let old = app.current_item().unwrap().since;
    handle_key(&mut app, key(KeyCode::Char('r')));

    let reloaded = file.load().unwrap();
    assert!(reloaded[0].since > old);
}

#[test]
fn delete_all_matches_then_search_again() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["gym", "coffee", "cocoa"]);
    handle_key(&mut app, key(KeyCode::Char('/')));
    type_str(&mut app, "^co");
    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(visible(&app), vec!["coffee", "cocoa"]);

    handle_key(&mut app, key(KeyCode::Char('D')));
    assert_eq!(app.pattern(), "");
    assert_eq!(visible(&app), vec!["gym"]);
    assert_eq!(on_disk(&file), vec!["gym"]);
}

#[test]
fn edits_keep_items_written_by_another_process() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["a"]);

    // A CLI `add` lands while the interactive list is open
    let since = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();
    file.update(|items| {
        items.push(Item::new("cli-item", since));
        Ok::<_, StoreError>(())
    })
    .unwrap();

    handle_key(&mut app, key(KeyCode::Char('r')));
    assert_eq!(on_disk(&file), vec!["a", "cli-item"]);
    assert_eq!(visible(&app), vec!["a", "cli-item"]);
    assert_eq!(app.current_item().unwrap().name, "a");
}

#[test]
fn delete_does_not_resurrect_items_removed_elsewhere() {
    let dir = TempDir::new().unwrap();
    let (mut app, file) = open(&dir, &["a", "b", "c"]);

    // A CLI `rm c` lands first
    file.update(|items| {
        items.retain(|i| i.name != "c");
        Ok::<_, StoreError>(())
    })
    .unwrap();

    handle_key(&mut app, key(KeyCode::Char('d')));
    assert_eq!(on_disk(&file), vec!["b"]);
    assert_eq!(visible(&app), vec!["b"]);
    assert_eq!(app.current_item().unwrap().name, "b");
}
