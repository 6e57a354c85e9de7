//! Append-only version history, one ordered ledger per content item.
//!
//! Every mutating operation appends a [`VersionRecord`] carrying a full
//! payload snapshot, so any record can later be restored. Records are never
//! mutated or removed - not even when the item itself is deleted, which
//! preserves the audit trail. Sequences are per-item, start at 1, and are
//! strictly increasing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clock;
use crate::item::Payload;

/// The kind of change a version record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum VersionAction {
    /// Item was created (logged only when the caller requests it)
    Create,
    /// Payload was saved with changes
    Edit,
    /// Payload went live
    Publish,
    /// Item was taken offline
    Unpublish,
    /// Item was removed from the library
    Delete,
    /// Payload was rolled back to an earlier record's snapshot
    Restore,
}

/// One immutable audit-log entry describing a single change to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VersionRecord {
    /// Item this record belongs to
    pub item_id: String,

    /// Per-item sequence number, starting at 1 and strictly increasing
    pub sequence: u64,

    /// Unix timestamp (milliseconds)
    pub timestamp: i64,

    /// Operator identity, recorded verbatim (not authenticated here)
    pub operator: String,

    /// What kind of change happened
    pub action: VersionAction,

    /// Human-readable change description, e.g. "changed: title, modules"
    pub summary: String,

    /// Full payload at this point, needed for restore
    pub payload_snapshot: Payload,
}

/// Append-only, per-item history of change records.
#[derive(Debug, Clone, Default)]
pub struct VersionLedger {
    by_item: IndexMap<String, Vec<VersionRecord>>,
}

impl VersionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for `item_id` and return a copy of it.
    pub fn append(
        &mut self,
        item_id: &str,
        operator: &str,
        action: VersionAction,
        summary: String,
        payload_snapshot: Payload,
    ) -> VersionRecord {
        let records = self.by_item.entry(item_id.to_string()).or_default();
        let sequence = records.last().map(|r| r.sequence + 1).unwrap_or(1);
        let record = VersionRecord {
            item_id: item_id.to_string(),
            sequence,
            timestamp: clock::now_millis(),
            operator: operator.to_string(),
            action,
            summary,
            payload_snapshot,
        };
        records.push(record.clone());
        record
    }

    /// All records for `item_id` in chronological order. Unknown ids yield
    /// an empty slice.
    pub fn list(&self, item_id: &str) -> &[VersionRecord] {
        self.by_item.get(item_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The most recent record for `item_id`, if any.
    pub fn latest(&self, item_id: &str) -> Option<&VersionRecord> {
        self.list(item_id).last()
    }

    /// Look up a record by item and sequence number.
    pub fn find(&self, item_id: &str, sequence: u64) -> Option<&VersionRecord> {
        self.list(item_id).iter().find(|r| r.sequence == sequence)
    }

    /// Number of records for `item_id`.
    pub fn len(&self, item_id: &str) -> usize {
        self.list(item_id).len()
    }

    /// Whether the ledger holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    /// Ids of all items that have at least one record.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.by_item.keys().map(String::as_str)
    }
}
