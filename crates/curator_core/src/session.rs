//! Editor session tracking.
//!
//! One [`EditorSession`] exists per open editing surface (modal, drawer,
//! full-page form). It owns the baseline snapshot taken when the editor
//! opened and the live payload under edit, and derives the dirty flag from
//! the two. Sessions are ephemeral: they are never persisted, and
//! discarding one has no effect on the content library or the ledger.
//!
//! Two sessions open on the same item do not share state; last write wins
//! at the moment each calls save. Conflict detection is out of scope.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clock;
use crate::diff;
use crate::item::{ContentItem, Payload};

/// Ephemeral per-editor state: baseline snapshot, live edits, and the
/// dirty/saving flags the UI binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EditorSession {
    /// Id of the item under edit, or `None` for a not-yet-persisted item
    pub item_id: Option<String>,

    /// Snapshot taken when the editor opened (or at the last commit)
    pub initial_payload: Payload,

    /// Live payload, replaced on every field change
    pub current_payload: Payload,

    /// Whether `current_payload` differs from `initial_payload`
    pub is_dirty: bool,

    /// Whether a save is currently in flight at the persistence boundary
    pub is_saving: bool,

    /// Unix timestamp (milliseconds) of the last successful commit
    pub last_saved_at: Option<i64>,

    /// Whether the editor has been closed; closed sessions ignore updates
    pub closed: bool,
}

impl EditorSession {
    /// Open a session on an existing item. The baseline is a deep copy of
    /// the item's payload, so the session starts clean.
    pub fn for_item(item: &ContentItem) -> Self {
        Self {
            item_id: Some(item.id.clone()),
            initial_payload: item.payload.clone(),
            current_payload: item.payload.clone(),
            is_dirty: false,
            is_saving: false,
            last_saved_at: None,
            closed: false,
        }
    }

    /// Open a session for a brand-new, not-yet-persisted item. New records
    /// count as unsaved from the start, so the session opens dirty.
    pub fn for_new() -> Self {
        Self {
            item_id: None,
            initial_payload: Payload::new(),
            current_payload: Payload::new(),
            is_dirty: true,
            is_saving: false,
            last_saved_at: None,
            closed: false,
        }
    }

    /// Replace the live payload and recompute the dirty flag against the
    /// baseline. Ignored on closed sessions.
    pub fn update(&mut self, payload: Payload) {
        if self.closed {
            return;
        }
        // A new item that was never committed stays dirty no matter what
        let never_persisted = self.item_id.is_none() && self.last_saved_at.is_none();
        self.is_dirty = never_persisted || diff::is_dirty(&self.initial_payload, &payload);
        self.current_payload = payload;
    }

    /// Mark a save as in flight at the persistence boundary.
    pub fn begin_save(&mut self) {
        if !self.closed {
            self.is_saving = true;
        }
    }

    /// Called after a successful save/publish: rebase the baseline onto the
    /// committed payload, clear the dirty and saving flags, and stamp
    /// `last_saved_at`. Returns the committed payload.
    pub fn commit(&mut self) -> Payload {
        if !self.closed {
            self.initial_payload = self.current_payload.clone();
            self.is_dirty = false;
            self.is_saving = false;
            self.last_saved_at = Some(clock::now_millis());
        }
        self.current_payload.clone()
    }

    /// Bind a freshly created item's id to a session opened via
    /// [`for_new`](Self::for_new).
    pub fn attach_item(&mut self, item_id: impl Into<String>) {
        self.item_id = Some(item_id.into());
    }

    /// Close the editor without committing. Always safe: no effect on the
    /// content library or the ledger.
    pub fn discard(&mut self) {
        self.closed = true;
        self.is_saving = false;
    }
}
