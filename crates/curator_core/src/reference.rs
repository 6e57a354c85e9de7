//! Reference index: which pages consume a content item.
//!
//! References are owned by the consuming pages, not by the items. The
//! surrounding application scans its page-configuration registry and hands
//! the result in wholesale before each mutation decision; this core treats
//! that snapshot as ground truth for one decision and never builds or
//! patches it incrementally. "No references" and "never indexed" are
//! indistinguishable by design.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A directed edge recording that a named consumer depends on a content
/// item by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Reference {
    /// Id of the referenced content item
    pub item_id: String,
    /// Display name of the consuming page or widget
    pub consumer_label: String,
    /// Route or path of the consumer, for "used on ..." prompts
    pub consumer_path: String,
}

impl Reference {
    /// Convenience constructor.
    pub fn new(
        item_id: impl Into<String>,
        consumer_label: impl Into<String>,
        consumer_path: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            consumer_label: consumer_label.into(),
            consumer_path: consumer_path.into(),
        }
    }
}

/// Point-in-time lookup from item id to the consumers referencing it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_item: IndexMap<String, Vec<Reference>>,
}

impl ReferenceIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a flat reference list, grouped by item id.
    pub fn from_references(references: Vec<Reference>) -> Self {
        let mut index = Self::new();
        index.replace_all(references);
        index
    }

    /// Replace the entire index with a fresh reference list. There is no
    /// incremental patching: the supplier recomputes and swaps.
    pub fn replace_all(&mut self, references: Vec<Reference>) {
        self.by_item.clear();
        for reference in references {
            self.by_item
                .entry(reference.item_id.clone())
                .or_default()
                .push(reference);
        }
    }

    /// References pointing at `item_id`. Unknown ids yield an empty slice,
    /// never an error.
    pub fn lookup(&self, item_id: &str) -> &[Reference] {
        self.by_item.get(item_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any consumer references `item_id`.
    pub fn has_references(&self, item_id: &str) -> bool {
        !self.lookup(item_id).is_empty()
    }

    /// Total number of references in the index.
    pub fn len(&self) -> usize {
        self.by_item.values().map(Vec::len).sum()
    }

    /// Whether the index holds no references at all.
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_yields_empty_slice() {
        let index = ReferenceIndex::new();
        assert!(index.lookup("banner-1").is_empty());
        assert!(!index.has_references("banner-1"));
    }

    #[test]
    fn test_lookup_groups_by_item() {
        let index = ReferenceIndex::from_references(vec![
            Reference::new("banner-1", "Home", "/"),
            Reference::new("banner-1", "About", "/about"),
            Reference::new("cert-2", "Quality", "/quality"),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("banner-1").len(), 2);
        assert_eq!(index.lookup("cert-2").len(), 1);
        assert_eq!(index.lookup("banner-1")[0].consumer_label, "Home");
    }

    #[test]
    fn test_replace_all_discards_previous_snapshot() {
        let mut index =
            ReferenceIndex::from_references(vec![Reference::new("banner-1", "Home", "/")]);
        index.replace_all(vec![Reference::new("cert-2", "Quality", "/quality")]);
        assert!(!index.has_references("banner-1"));
        assert!(index.has_references("cert-2"));
        assert_eq!(index.len(), 1);
    }
}
