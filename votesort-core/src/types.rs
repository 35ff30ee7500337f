use std::collections::HashMap;

use crate::error::SortError;

/// An entry to be ranked.
///
/// Items are identified by caller-provided `i64` IDs that must be unique
/// within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: i64,
    pub title: String,
}

impl Item {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Item { id, title: title.into() }
    }
}

/// Answer to a single pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vote {
    /// The left item is preferred.
    Left,
    /// The right item is preferred.
    Right,
    /// Keep both. The left item is placed first.
    Tie,
}

/// The comparison currently awaiting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pair<'a> {
    pub left: &'a Item,
    pub right: &'a Item,
}

/// Internal item index (position in the catalog, not the caller's ID).
pub(crate) type ItemIdx = usize;

/// A ranked run of item indices, best-known first.
pub(crate) type Run = Vec<ItemIdx>;

/// The immutable item list of a session.
///
/// Maps between caller i64 IDs and internal 0..N indices. Session state only
/// ever stores indices into this catalog.
#[derive(Debug, Clone)]
pub(crate) struct ItemCatalog {
    items: Vec<Item>,
    id_to_idx: HashMap<i64, ItemIdx>,
}

impl ItemCatalog {
    /// Validate and take ownership of the caller's items.
    ///
    /// Rejects an empty list, duplicate IDs, and blank titles.
    pub fn from_items(items: Vec<Item>) -> Result<Self, SortError> {
        if items.is_empty() {
            return Err(SortError::EmptyInput);
        }

        let mut id_to_idx = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if item.title.trim().is_empty() {
                return Err(SortError::EmptyTitle(item.id));
            }
            if id_to_idx.insert(item.id, idx).is_some() {
                return Err(SortError::DuplicateId(item.id));
            }
        }

        Ok(ItemCatalog { items, id_to_idx })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, idx: ItemIdx) -> &Item {
        &self.items[idx]
    }

    pub fn to_idx(&self, id: i64) -> Option<ItemIdx> {
        self.id_to_idx.get(&id).copied()
    }

    pub fn resolve<'a>(&'a self, run: &[ItemIdx]) -> Vec<&'a Item> {
        run.iter().map(|&idx| self.get(idx)).collect()
    }
}
