//! Content item data model.
//!
//! A [`ContentItem`] is the unit the admin surface edits: a stable id, a
//! content-type tag, an opaque JSON payload, and lifecycle bookkeeping. The
//! payload's business fields (article text, banner colors, ...) are owned by
//! the editors; this core only compares and snapshots them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::clock;
use crate::diff;

/// Opaque structured content payload: an ordered mapping of field name to
/// JSON value. Insertion order is preserved for display; equality ignores
/// key order (see [`crate::diff`]).
pub type Payload = IndexMap<String, Value>;

/// Lifecycle state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LifecycleState {
    /// Not yet live to consumers
    Draft,
    /// Live, with `published_payload` matching `payload`
    Published,
    /// Live under `published_payload`, but with saved edits not yet republished
    PendingUpdate,
    /// Previously published, explicitly taken down; retained with history
    Offline,
}

impl LifecycleState {
    /// Whether consumers currently see this item.
    pub fn is_live(self) -> bool {
        matches!(self, LifecycleState::Published | LifecycleState::PendingUpdate)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Draft => "draft",
            LifecycleState::Published => "published",
            LifecycleState::PendingUpdate => "pending_update",
            LifecycleState::Offline => "offline",
        };
        write!(f, "{}", name)
    }
}

/// A content item owned by the content library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContentItem {
    /// Stable identity
    pub id: String,

    /// Content-type tag, e.g. "certificate", "person", "banner"
    pub kind: String,

    /// Current (possibly unpublished) payload
    pub payload: Payload,

    /// Lifecycle state
    pub status: LifecycleState,

    /// Last payload that was actually published. `None` iff the item has
    /// never been published.
    pub published_payload: Option<Payload>,

    /// Unix timestamp (milliseconds) of the last mutation
    pub updated_at: i64,

    /// Unix timestamp (milliseconds) of the last publish, if any
    pub published_at: Option<i64>,
}

impl ContentItem {
    /// Create a new draft item with no publish history.
    pub fn draft(id: impl Into<String>, kind: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            payload,
            status: LifecycleState::Draft,
            published_payload: None,
            updated_at: clock::now_millis(),
            published_at: None,
        }
    }

    /// Whether consumers currently see this item.
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Whether the current payload differs from the last published payload.
    /// Always true for items that have never been published.
    pub fn has_unpublished_edits(&self) -> bool {
        match &self.published_payload {
            Some(published) => diff::is_dirty(&self.payload, published),
            None => true,
        }
    }
}
