//! Guarded mutation coordination.
//!
//! [`MutationCoordinator`] orchestrates every mutation on the content
//! library: it runs the lifecycle transition, consults the reference index
//! to decide whether user confirmation is required, appends to the version
//! ledger, and returns the resulting item state. All guards run before any
//! mutation, so on failure the library and ledger are untouched and the
//! caller can retry or abandon safely.
//!
//! The coordinator performs no I/O. Durably storing the returned item and
//! ledger entry, rendering confirmation prompts, and recomputing the
//! reference index all belong to the surrounding application.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clock;
use crate::diff;
use crate::error::{CuratorError, Result};
use crate::item::{ContentItem, LifecycleState, Payload};
use crate::ledger::{VersionAction, VersionLedger, VersionRecord};
use crate::library::ContentLibrary;
use crate::lifecycle::{self, LifecycleAction};
use crate::reference::{Reference, ReferenceIndex};

/// Outcome of a deletion request. Returned as data; rendering the prompt
/// and the confirm/cancel interaction are the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DeletionPlan {
    /// No references, not live: `confirm_delete` may proceed directly.
    Ready,
    /// Other pages reference this item; the caller must ask the user and
    /// re-invoke `confirm_delete` explicitly.
    NeedsConfirmation {
        /// The consumers that currently reference the item
        references: Vec<Reference>,
    },
    /// The item is live. It must be unpublished before deletion.
    Blocked,
}

/// Orchestrates save/publish/unpublish/delete/restore over a caller-owned
/// [`ContentLibrary`], recording every change in its [`VersionLedger`].
#[derive(Debug, Default)]
pub struct MutationCoordinator {
    ledger: VersionLedger,
    references: ReferenceIndex,
}

impl MutationCoordinator {
    /// Create a coordinator with an empty ledger and reference index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator with an initial reference index.
    pub fn with_references(references: ReferenceIndex) -> Self {
        Self {
            ledger: VersionLedger::new(),
            references,
        }
    }

    /// Swap in a freshly computed reference index. The index is a
    /// point-in-time read used for the next decisions; the coordinator
    /// never patches it incrementally.
    pub fn replace_references(&mut self, references: ReferenceIndex) {
        self.references = references;
    }

    /// Current references for `item_id`, for "used elsewhere, continue
    /// anyway?" prompts ahead of a risky save or publish.
    pub fn references(&self, item_id: &str) -> &[Reference] {
        self.references.lookup(item_id)
    }

    /// Read access to the version ledger.
    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    /// Ordered version history for `item_id`, for the history UI.
    pub fn history(&self, item_id: &str) -> &[VersionRecord] {
        self.ledger.list(item_id)
    }

    /// Create a new draft item.
    ///
    /// Creation is only logged to the ledger when `record_creation` is set;
    /// most editors treat the first save/publish as the first interesting
    /// event.
    pub fn create(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        kind: &str,
        payload: Payload,
        operator: &str,
        record_creation: bool,
    ) -> Result<ContentItem> {
        if library.contains(id) {
            return Err(CuratorError::DuplicateId(id.to_string()));
        }
        let item = ContentItem::draft(id, kind, payload);
        if record_creation {
            self.ledger.append(
                id,
                operator,
                VersionAction::Create,
                format!("created ({})", kind),
                item.payload.clone(),
            );
        }
        library.insert(item.clone());
        Ok(item)
    }

    /// Save a new payload onto an item.
    ///
    /// Saving unchanged content is a no-op: no ledger record, no status
    /// change. A dirty save on a draft stays draft; on a live item whose
    /// new payload differs from the published payload it moves to
    /// `pending_update`; on an offline item it stays offline (the item
    /// remains not live until reactivated and republished).
    pub fn save(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        new_payload: Payload,
        operator: &str,
    ) -> Result<ContentItem> {
        let item = library
            .get_mut(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;

        if !diff::is_dirty(&item.payload, &new_payload) {
            log::debug!("save: no changes for '{}', skipping ledger append", id);
            return Ok(item.clone());
        }

        let next_status = if item.status == LifecycleState::Published {
            let differs_from_published = item
                .published_payload
                .as_ref()
                .is_none_or(|published| diff::is_dirty(&new_payload, published));
            if differs_from_published {
                lifecycle::next_state(item.status, LifecycleAction::EditSaved)?
            } else {
                item.status
            }
        } else {
            item.status
        };

        let summary = diff::summarize(&item.payload, &new_payload);
        item.payload = new_payload;
        item.status = next_status;
        item.updated_at = clock::now_millis();
        self.ledger.append(
            id,
            operator,
            VersionAction::Edit,
            summary,
            item.payload.clone(),
        );
        Ok(item.clone())
    }

    /// Publish the current payload, making it live.
    ///
    /// Drafts publish unconditionally. Live items require the payload to
    /// differ from the published payload, otherwise
    /// [`CuratorError::NothingToPublish`]. Offline items must be
    /// reactivated first.
    pub fn publish(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        operator: &str,
    ) -> Result<ContentItem> {
        let item = library
            .get_mut(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;

        if item.status != LifecycleState::Draft && !item.has_unpublished_edits() {
            return Err(CuratorError::NothingToPublish(id.to_string()));
        }
        let next_status = lifecycle::next_state(item.status, LifecycleAction::Publish)?;

        let now = clock::now_millis();
        item.status = next_status;
        item.published_payload = Some(item.payload.clone());
        item.published_at = Some(now);
        item.updated_at = now;
        self.ledger.append(
            id,
            operator,
            VersionAction::Publish,
            "published".to_string(),
            item.payload.clone(),
        );
        Ok(item.clone())
    }

    /// Take a live item offline. Payload and history are retained.
    pub fn unpublish(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        operator: &str,
    ) -> Result<ContentItem> {
        let item = library
            .get_mut(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;

        let next_status = lifecycle::next_state(item.status, LifecycleAction::Unpublish)?;
        item.status = next_status;
        item.updated_at = clock::now_millis();
        self.ledger.append(
            id,
            operator,
            VersionAction::Unpublish,
            "taken offline".to_string(),
            item.payload.clone(),
        );
        Ok(item.clone())
    }

    /// Bring an offline item back into the edit cycle as a draft.
    ///
    /// A pure status flip: not logged to the ledger, and the old
    /// `published_payload`/`published_at` are retained for history display.
    pub fn reactivate(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        operator: &str,
    ) -> Result<ContentItem> {
        let item = library
            .get_mut(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;

        let next_status = lifecycle::next_state(item.status, LifecycleAction::Reactivate)?;
        log::debug!("reactivate: '{}' back to draft by {}", id, operator);
        item.status = next_status;
        item.updated_at = clock::now_millis();
        Ok(item.clone())
    }

    /// Plan a deletion. Read-only: deletion never happens from this call.
    ///
    /// Live items are [`DeletionPlan::Blocked`] (unpublish first).
    /// Referenced items need explicit confirmation; unreferenced draft or
    /// offline items are [`DeletionPlan::Ready`].
    pub fn request_delete(&self, library: &ContentLibrary, id: &str) -> Result<DeletionPlan> {
        let item = library
            .get(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;

        if !lifecycle::can_delete(item.status) {
            log::debug!("request_delete: '{}' is live, deletion blocked", id);
            return Ok(DeletionPlan::Blocked);
        }
        let references = self.references.lookup(id);
        if references.is_empty() {
            Ok(DeletionPlan::Ready)
        } else {
            Ok(DeletionPlan::NeedsConfirmation {
                references: references.to_vec(),
            })
        }
    }

    /// Delete an item after the caller confirmed the plan.
    ///
    /// The lifecycle gate is re-checked: live items are refused even if the
    /// caller skipped [`request_delete`](Self::request_delete). The delete
    /// record (with the final payload snapshot) stays in the ledger as an
    /// audit trail after the item is removed.
    pub fn confirm_delete(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        operator: &str,
    ) -> Result<VersionRecord> {
        let item = library
            .get(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;
        lifecycle::next_state(item.status, LifecycleAction::Delete)?;

        let item = library
            .remove(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;
        let record = self.ledger.append(
            id,
            operator,
            VersionAction::Delete,
            "deleted".to_string(),
            item.payload,
        );
        Ok(record)
    }

    /// Roll an item's payload back to an earlier version record.
    ///
    /// If the restored record was a publish, the published payload is
    /// rolled back too (that snapshot was live content). The ledger stays
    /// append-only: a `restore` record is appended and every later record
    /// remains, so a later restore can undo the undo.
    pub fn restore(
        &mut self,
        library: &mut ContentLibrary,
        id: &str,
        sequence: u64,
        operator: &str,
    ) -> Result<ContentItem> {
        if !library.contains(id) {
            return Err(CuratorError::NotFound(id.to_string()));
        }
        let record = self
            .ledger
            .find(id, sequence)
            .ok_or_else(|| CuratorError::VersionNotFound {
                item_id: id.to_string(),
                sequence,
            })?;
        let snapshot = record.payload_snapshot.clone();
        let was_publish = record.action == VersionAction::Publish;

        let item = library
            .get_mut(id)
            .ok_or_else(|| CuratorError::NotFound(id.to_string()))?;
        item.payload = snapshot.clone();
        if was_publish {
            item.published_payload = Some(snapshot);
        }
        // Live items land on published or pending_update depending on
        // whether the restored payload matches the live one
        if item.status.is_live() {
            item.status = if item.has_unpublished_edits() {
                LifecycleState::PendingUpdate
            } else {
                LifecycleState::Published
            };
        }
        item.updated_at = clock::now_millis();
        self.ledger.append(
            id,
            operator,
            VersionAction::Restore,
            format!("restored to version {}", sequence),
            item.payload.clone(),
        );
        Ok(item.clone())
    }
}
