//! Content library: the keyed collection of content items.
//!
//! Conceptually this is the application's content store; the coordinator
//! borrows it mutably per operation. Keeping it a plain in-memory map keeps
//! the core free of storage concerns - durably persisting the collection
//! after a successful mutation is the surrounding application's job.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::item::ContentItem;

/// Collection of content items keyed by id, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentLibrary {
    items: IndexMap<String, ContentItem>,
}

impl ContentLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, returning the previous item with the same id if any.
    pub fn insert(&mut self, item: ContentItem) -> Option<ContentItem> {
        self.items.insert(item.id.clone(), item)
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.get(id)
    }

    /// Look up an item mutably by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ContentItem> {
        self.items.get_mut(id)
    }

    /// Remove an item, preserving the order of the remaining items.
    pub fn remove(&mut self, id: &str) -> Option<ContentItem> {
        self.items.shift_remove(id)
    }

    /// Whether an item with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of items in the library.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// All items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.values()
    }

    /// Items of one content type, e.g. every "banner".
    pub fn items_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ContentItem> {
        self.items.values().filter(move |item| item.kind == kind)
    }
}
