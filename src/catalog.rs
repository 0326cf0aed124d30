use crate::error::{PicksError, Result};
use crate::types::{Category, CategoryId, CategorySet, ItemId, Selectable};
use std::collections::HashMap;

/// Ordered, immutable list of selectable items plus the categories they compete for
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
    categories: CategorySet,
}

impl<T: Selectable> Catalog<T> {
    /// Builds a catalog in fetch order. Duplicate keys are rejected since two
    /// items sharing a key could not be told apart in a submission.
    pub fn new(items: Vec<T>, categories: CategorySet) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.key().to_string(), i).is_some() {
                return Err(PicksError::DuplicateItem(item.key().to_string()));
            }
        }
        Ok(Self {
            items,
            index,
            categories,
        })
    }

    pub fn item_id(&self, key: &str) -> Option<ItemId> {
        self.index.get(key).copied().map(ItemId)
    }

    /// Resolves a user-supplied key, falling back to a 1-based position
    pub fn resolve_item(&self, key_or_position: &str) -> Result<ItemId> {
        if let Some(id) = self.item_id(key_or_position) {
            return Ok(id);
        }
        key_or_position
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.items.len()).contains(n))
            .map(|n| ItemId(n - 1))
            .ok_or_else(|| PicksError::UnknownItem(key_or_position.to_string()))
    }

    pub fn category_id(&self, label: &str) -> Option<CategoryId> {
        self.categories.id_of(label)
    }

    pub fn resolve_category(&self, label: &str) -> Result<CategoryId> {
        self.category_id(label)
            .ok_or_else(|| PicksError::UnknownCategory(label.to_string()))
    }

    pub fn item(&self, id: ItemId) -> &T {
        &self.items[id.0]
    }

    pub fn key(&self, id: ItemId) -> &str {
        self.items[id.0].key()
    }

    pub fn category(&self, id: CategoryId) -> &Category {
        self.categories.get(id)
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &T)> {
        self.items.iter().enumerate().map(|(i, item)| (ItemId(i), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
