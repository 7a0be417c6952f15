use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::io::store_io::{JsonFile, Persistence};
use crate::model::{Config, Item};
use crate::ops::filter::{self, Filter};
use crate::ops::selection::SelectionEngine;
use crate::ops::store::{Change, ItemId, ItemStore};

use super::input;
use super::line_editor::LineEditor;
use super::render;
use super::theme::Theme;

/// Name of the item created the first time the data file is missing
pub const FIRST_RUN_ITEM: &str = "First time opened timetrack";

/// Rows taken by the border and the prompt row; the rest is the list
const CHROME_ROWS: u16 = 3;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Search,
    AddNew,
    Rename,
    Help,
}

/// Main application state
pub struct App {
    pub store: ItemStore,
    pub selection: SelectionEngine,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub config: Config,
    pub search_editor: LineEditor,
    pub add_editor: LineEditor,
    pub rename_editor: LineEditor,
    /// Item being renamed, captured when Rename mode was entered
    pub rename_target: Option<ItemId>,
    pub help_scroll: usize,
    /// List rows that fit on screen; PgUp/PgDn move by this much
    pub page_size: usize,
    /// One-shot feedback shown in the prompt row until the next key
    pub message: Option<String>,
    pattern: String,
    filter: Filter,
    persistence: Box<dyn Persistence>,
}

impl App {
    pub fn new(items: Vec<Item>, config: Config, persistence: Box<dyn Persistence>) -> Self {
        let max_len = config.behavior.max_name_length;
        let on_tab = config.behavior.submit_on_tab;
        let mut app = App {
            store: ItemStore::from_items(items),
            selection: SelectionEngine::new(),
            mode: Mode::List,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            search_editor: LineEditor::new().with_submit_on_tab(on_tab),
            add_editor: LineEditor::new()
                .with_max_length(max_len)
                .with_submit_on_tab(on_tab),
            rename_editor: LineEditor::new()
                .with_max_length(max_len)
                .with_submit_on_tab(on_tab),
            rename_target: None,
            help_scroll: 0,
            page_size: 10,
            message: None,
            pattern: String::new(),
            filter: Filter::default(),
            persistence,
            config,
        };
        app.refresh();
        app
    }

    /// Items in the current view, in display order
    pub fn filtered(&self) -> &[ItemId] {
        self.selection.view()
    }

    pub fn current(&self) -> Option<ItemId> {
        self.selection.current()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current().and_then(|id| self.store.get(id))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// The editor owned by the current mode, if any
    pub fn active_editor(&self) -> Option<&LineEditor> {
        match self.mode {
            Mode::Search => Some(&self.search_editor),
            Mode::AddNew => Some(&self.add_editor),
            Mode::Rename => Some(&self.rename_editor),
            Mode::List | Mode::Help => None,
        }
    }

    /// Replace the search pattern and rebuild the view. An invalid pattern
    /// shows everything; the error is kept on the filter for display.
    pub fn set_pattern(&mut self, pattern: &str) {
        if pattern == self.pattern {
            return;
        }
        self.pattern = pattern.to_string();
        self.filter = filter::compile(pattern, self.config.search.ignore_case);
        if let Some(err) = self.filter.error() {
            debug!(%err, "search pattern does not compile");
        }
        self.refresh();
    }

    /// Rebuild the view, keeping the selected item when it still matches
    pub fn refresh(&mut self) {
        self.selection.recompute(&self.store, &self.filter);
    }

    /// Rebuild the view after the selected item went away
    pub fn refresh_near(&mut self, index: usize) {
        self.selection
            .recompute_near(&self.store, &self.filter, index);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "mode change");
            self.mode = mode;
        }
    }

    /// Save a change the store already holds. The saved list may carry
    /// edits from other processes; those are merged in and the view rebuilt.
    /// Failures are logged and leave the in-memory state as it is.
    pub fn persist(&mut self, change: Change) {
        match self.persistence.apply(&change) {
            Ok(items) => {
                info!(count = items.len(), "saved items");
                if items != self.store.to_items() {
                    debug!("merging items saved elsewhere");
                    self.store.sync(items);
                    self.refresh();
                }
            }
            Err(e) => warn!(error = %e, "could not save items"),
        }
    }
}

/// Load the data file, creating the first-run item when it does not exist yet
fn load_items(file: &JsonFile) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
    if file.exists() {
        return Ok(file.load()?);
    }
    info!(path = %file.path().display(), "no data file, seeding first item");
    let items = vec![Item::new(FIRST_RUN_ITEM, Utc::now())];
    file.save(&items)?;
    Ok(items)
}

pub fn run(file: JsonFile, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(&file)?;
    let tick = Duration::from_millis(config.ui.tick_ms.max(1));
    let mut app = App::new(items, config, Box::new(file));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let size = terminal.size()?;
        app.page_size = size.height.saturating_sub(CHROME_ROWS).max(1) as usize;

        // Redrawing on every tick keeps the elapsed times current
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(tick)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddPosition;
    use crate::tui::render::test_helpers::{MemoryStore, app_with};
    use tempfile::TempDir;

    #[test]
    fn new_app_selects_first_item() {
        let app = app_with(&["a", "b"]);
        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.filtered().len(), 2);
        assert_eq!(app.current_item().unwrap().name, "a");
    }

    #[test]
    fn invalid_pattern_shows_everything() {
        let mut app = app_with(&["a", "b"]);
        app.set_pattern("(");
        assert_eq!(app.pattern(), "(");
        assert!(!app.filter().is_valid());
        assert_eq!(app.filtered().len(), 2);
    }

    #[test]
    fn ignore_case_comes_from_config() {
        let mut config = Config::default();
        config.search.ignore_case = true;
        let items = vec![Item::new("Coffee", Utc::now())];
        let store = MemoryStore::with_items(&items);
        let mut app = App::new(items, config, Box::new(store));
        app.set_pattern("coffee");
        assert_eq!(app.filtered().len(), 1);
    }

    #[test]
    fn persist_merges_items_saved_elsewhere() {
        let a = Item::new("a", Utc::now());
        let store = MemoryStore::with_items(std::slice::from_ref(&a));
        let stored = store.stored.clone();
        let mut app = App::new(vec![a.clone()], Config::default(), Box::new(store));
        let a_id = app.current().unwrap();

        stored.borrow_mut().push(Item::new("elsewhere", Utc::now()));

        let b = Item::new("b", Utc::now());
        app.store.insert(b.clone(), AddPosition::Bottom);
        app.persist(Change::Insert { item: b, position: AddPosition::Bottom });

        let names: Vec<&str> = app
            .filtered()
            .iter()
            .map(|id| app.item(*id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "elsewhere", "b"]);
        assert_eq!(app.current(), Some(a_id));
        assert_eq!(stored.borrow().len(), 3);
    }

    #[test]
    fn missing_data_file_is_seeded() {
        let tmp = TempDir::new().unwrap();
        let file = JsonFile::new(tmp.path().join("items.json"));
        let items = load_items(&file).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, FIRST_RUN_ITEM);
        assert!(file.exists());

        // Second start loads what was saved
        let again = load_items(&file).unwrap();
        assert_eq!(again, items);
    }
}
