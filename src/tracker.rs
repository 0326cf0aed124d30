//! Forced-ranking selection state.
//!
//! Each category is awarded to at most one item and each item holds at most
//! one category. A category only becomes free again when its holder deselects
//! it or moves to another category; it is never taken over by a different item
//! in a single call.

use crate::catalog::Catalog;
use crate::payload::{Assignment, SubmissionPayload};
use crate::types::{CategoryId, ItemId, Selectable};
use std::collections::BTreeMap;

/// What a single [`SelectionTracker::toggle`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item had no category and now holds the requested one
    Selected,
    /// The item already held the requested category and released it
    Deselected,
    /// The item moved from `previous` to the requested category
    Reassigned { previous: CategoryId },
    /// Another item holds the category; nothing changed
    Locked { holder: ItemId },
}

impl ToggleOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, ToggleOutcome::Locked { .. })
    }
}

/// Visual state of one item's category button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// This item holds the category
    Active,
    /// Nobody holds the category
    Available,
    /// Another item holds the category
    Disabled,
}

#[derive(Debug, Clone)]
pub struct SelectionTracker<T> {
    catalog: Catalog<T>,
    // Keyed by ItemId so iteration follows catalog order
    by_item: BTreeMap<ItemId, CategoryId>,
    holders: Vec<Option<ItemId>>,
}

impl<T: Selectable> SelectionTracker<T> {
    /// Starts an empty selection over `catalog`
    pub fn new(catalog: Catalog<T>) -> Self {
        let holders = vec![None; catalog.categories().len()];
        Self {
            catalog,
            by_item: BTreeMap::new(),
            holders,
        }
    }

    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    /// Selects, deselects or moves `item` to `category`. Never fails.
    pub fn toggle(&mut self, item: ItemId, category: CategoryId) -> ToggleOutcome {
        debug_assert!(item.index() < self.catalog.len(), "item handle from another catalog");

        let current = self.by_item.get(&item).copied();
        if current == Some(category) {
            self.by_item.remove(&item);
            self.holders[category.index()] = None;
            return ToggleOutcome::Deselected;
        }

        // The item does not hold this category, so any holder is someone else
        if let Some(holder) = self.holders[category.index()] {
            return ToggleOutcome::Locked { holder };
        }

        if let Some(previous) = current {
            self.holders[previous.index()] = None;
        }
        self.by_item.insert(item, category);
        self.holders[category.index()] = Some(item);

        match current {
            Some(previous) => ToggleOutcome::Reassigned { previous },
            None => ToggleOutcome::Selected,
        }
    }

    /// True when every category has exactly one holder
    pub fn is_complete(&self) -> bool {
        self.by_item.len() == self.holders.len()
    }

    /// True when an item other than `excluding` holds `category`
    pub fn is_category_taken(&self, category: CategoryId, excluding: ItemId) -> bool {
        matches!(self.holders[category.index()], Some(holder) if holder != excluding)
    }

    pub fn category_of(&self, item: ItemId) -> Option<CategoryId> {
        self.by_item.get(&item).copied()
    }

    pub fn holder_of(&self, category: CategoryId) -> Option<ItemId> {
        self.holders[category.index()]
    }

    pub fn button_state(&self, item: ItemId, category: CategoryId) -> ButtonState {
        match self.holders[category.index()] {
            Some(holder) if holder == item => ButtonState::Active,
            Some(_) => ButtonState::Disabled,
            None => ButtonState::Available,
        }
    }

    /// Current assignments in catalog order
    pub fn assignments(&self) -> impl Iterator<Item = (ItemId, CategoryId)> + '_ {
        self.by_item.iter().map(|(item, category)| (*item, *category))
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    /// Number of assignments required for completion
    pub fn required(&self) -> usize {
        self.holders.len()
    }

    pub fn reset(&mut self) {
        self.by_item.clear();
        self.holders.iter_mut().for_each(|h| *h = None);
    }

    /// Serializes whatever is currently assigned, in catalog order.
    /// Callers gate on [`Self::is_complete`] before sending it anywhere.
    pub fn to_submission_payload(&self) -> SubmissionPayload {
        let selections = self
            .assignments()
            .map(|(item, category)| Assignment::new(self.catalog.key(item), self.catalog.category(category).label.clone()))
            .collect();
        SubmissionPayload { selections }
    }
}
