//! Filtered view over an [`ItemStore`] with a selection that follows items,
//! not positions.
//!
//! The view is a subsequence of store order and is only ever rebuilt from the
//! store, never edited in place. When the view is non-empty the selection is
//! a valid `(index, handle)` pair with `view[index] == handle`; when empty
//! there is no selection.

use super::filter::Filter;
use super::store::{ItemId, ItemStore};

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    view: Vec<ItemId>,
    current: Option<(usize, ItemId)>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the view. Keeps the previously selected item if it still
    /// matches, otherwise selects the first item.
    pub fn recompute(&mut self, store: &ItemStore, filter: &Filter) -> &[ItemId] {
        let previous = self.current();
        self.view = store.matching(filter);
        self.current = previous
            .and_then(|id| self.view.iter().position(|v| *v == id).map(|i| (i, id)))
            .or_else(|| self.view.first().map(|id| (0, *id)));
        &self.view
    }

    /// Rebuild the view and select the item at `index`, clamped to the last
    /// item. Used after deletions, where the old selection is gone.
    pub fn recompute_near(&mut self, store: &ItemStore, filter: &Filter, index: usize) -> &[ItemId] {
        self.view = store.matching(filter);
        self.current = if self.view.is_empty() {
            None
        } else {
            let i = index.min(self.view.len() - 1);
            Some((i, self.view[i]))
        };
        &self.view
    }

    /// Move the selection by `delta` rows. A move that would leave the view
    /// does nothing; there is no wraparound. Returns whether it moved.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let Some((index, _)) = self.current else {
            return false;
        };
        let Some(target) = index.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.view.len() || target == index {
            return false;
        }
        self.current = Some((target, self.view[target]));
        true
    }

    /// Select `id` if it is in the view
    pub fn select(&mut self, id: ItemId) -> bool {
        match self.view.iter().position(|v| *v == id) {
            Some(i) => {
                self.current = Some((i, id));
                true
            }
            None => false,
        }
    }

    pub fn select_first(&mut self) {
        self.current = self.view.first().map(|id| (0, *id));
    }

    pub fn select_last(&mut self) {
        self.current = self.view.last().map(|id| (self.view.len() - 1, *id));
    }

    pub fn view(&self) -> &[ItemId] {
        &self.view
    }

    pub fn current(&self) -> Option<ItemId> {
        self.current.map(|(_, id)| id)
    }

    pub fn index(&self) -> Option<usize> {
        self.current.map(|(i, _)| i)
    }
}
