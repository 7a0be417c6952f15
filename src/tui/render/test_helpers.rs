use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store_io::{Persistence, StoreError};
use crate::model::{Config, Item};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`
pub fn render_app(app: &App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// Persistence held in memory. `stored` is what `load` returns (tests may
/// change it to stand in for another process); `saved` is the last save, if
/// any.
#[derive(Default)]
pub struct MemoryStore {
    pub stored: Rc<RefCell<Vec<Item>>>,
    pub saved: Rc<RefCell<Option<Vec<Item>>>>,
}

impl MemoryStore {
    pub fn with_items(items: &[Item]) -> Self {
        MemoryStore {
            stored: Rc::new(RefCell::new(items.to_vec())),
            saved: Rc::default(),
        }
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        *self.stored.borrow_mut() = items.to_vec();
        *self.saved.borrow_mut() = Some(items.to_vec());
        Ok(())
    }
}

/// App over items named `names`, all started now
pub fn app_with(names: &[&str]) -> App {
    let now = Utc::now();
    app_with_items(names.iter().map(|n| (*n, now)).collect())
}

pub fn app_with_items(items: Vec<(&str, DateTime<Utc>)>) -> App {
    let items: Vec<Item> = items
        .into_iter()
        .map(|(name, since)| Item::new(name, since))
        .collect();
    let store = MemoryStore::with_items(&items);
    App::new(items, Config::default(), Box::new(store))
}
