use chrono::{DateTime, Utc};

use crate::model::item::{AddPosition, Item};

use super::filter::Filter;

/// Most items a store accepts through the CLI
pub const MAX_ITEMS: usize = 200;

/// Error type for item operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item name cannot be empty")]
    EmptyName,
    #[error("an item named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("you have reached the limit of {0} items")]
    LimitReached(usize),
    #[error("no items match /{0}/")]
    NoMatches(String),
    #[error("invalid date \"{0}\": expected YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),
}

/// Stable reference to an item in an [`ItemStore`].
///
/// Handles survive insertions and removals of other items, unlike positions.
/// They are not persisted: a freshly loaded store hands out new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

#[derive(Debug, Clone)]
struct Entry {
    id: ItemId,
    item: Item,
}

/// Ordered list of items. Order is display order.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        let mut store = ItemStore::new();
        for item in items {
            store.insert(item, AddPosition::Bottom);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items in display order with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.entries.iter().map(|e| (e.id, &e.item))
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Owned copy of the items, in order (what gets persisted)
    pub fn to_items(&self) -> Vec<Item> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.item)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Handle of the first item whose name equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        self.entries
            .iter()
            .find(|e| e.item.name == name)
            .map(|e| e.id)
    }

    /// Handles of every item the filter matches, in order
    pub fn matching(&self, filter: &Filter) -> Vec<ItemId> {
        self.entries
            .iter()
            .filter(|e| filter.is_match(&e.item.name))
            .map(|e| e.id)
            .collect()
    }

    pub fn insert(&mut self, item: Item, position: AddPosition) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        let entry = Entry { id, item };
        match position {
            AddPosition::Top => self.entries.insert(0, entry),
            AddPosition::Bottom => self.entries.push(entry),
        }
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.position(id)?;
        Some(self.entries.remove(idx).item)
    }

    /// Remove every listed item. Returns how many were removed.
    pub fn remove_all(&mut self, ids: &[ItemId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the contents with `items`, which may hold changes made by
    /// another process. Entries still present unchanged keep their handles;
    /// new or modified items get fresh ones.
    pub fn sync(&mut self, items: Vec<Item>) {
        let mut old = std::mem::take(&mut self.entries);
        for item in items {
            let id = match old.iter().position(|e| e.item == item) {
                Some(i) => old.remove(i).id,
                None => {
                    let id = ItemId(self.next_id);
                    self.next_id += 1;
                    id
                }
            };
            self.entries.push(Entry { id, item });
        }
    }

    /// Replace an item's name. Returns false if the handle is stale.
    pub fn rename(&mut self, id: ItemId, name: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.item.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Reset an item's timestamp. Returns false if the handle is stale.
    pub fn restart(&mut self, id: ItemId, now: DateTime<Utc>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.item.since = now;
                true
            }
            None => false,
        }
    }
}

/// One edit to the item list, kept by value so it can be replayed onto a
/// copy of the list that someone else has written since it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Insert { item: Item, position: AddPosition },
    Remove(Vec<Item>),
    Rename { item: Item, name: String },
    Restart { item: Item, since: DateTime<Utc> },
}

impl Change {
    /// Apply to `items`. Items are found by value; ones that are gone are
    /// skipped.
    pub fn apply(&self, items: &mut Vec<Item>) {
        match self {
            Change::Insert { item, position } => match position {
                AddPosition::Top => items.insert(0, item.clone()),
                AddPosition::Bottom => items.push(item.clone()),
            },
            Change::Remove(gone) => {
                for item in gone {
                    if let Some(i) = items.iter().position(|it| it == item) {
                        items.remove(i);
                    }
                }
            }
            Change::Rename { item, name } => {
                if let Some(it) = items.iter_mut().find(|it| *it == item) {
                    it.name = name.clone();
                }
            }
            Change::Restart { item, since } => {
                if let Some(it) = items.iter_mut().find(|it| *it == item) {
                    it.since = *since;
                }
            }
        }
    }
}

/// Reject names that are empty or all whitespace. The name is kept as typed.
pub fn validate_name(name: &str) -> Result<&str, ItemError> {
    if name.trim().is_empty() {
        Err(ItemError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Checks applied before a non-interactive add: name, uniqueness, capacity.
pub fn check_new_item(store: &ItemStore, name: &str) -> Result<(), ItemError> {
    if store.len() >= MAX_ITEMS {
        return Err(ItemError::LimitReached(MAX_ITEMS));
    }
    let name = validate_name(name)?;
    if store.find_by_name(name).is_some() {
        return Err(ItemError::DuplicateName(name.to_string()));
    }
    Ok(())
}
