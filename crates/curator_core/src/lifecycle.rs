//! Lifecycle state machine for content items.
//!
//! Encodes the fixed transition table shared by every editor:
//!
//! ```text
//! draft ──publish──▶ published ──edit+save──▶ pending_update
//!                        │                         │
//!                        │◀───────publish──────────┘
//!                        │
//!                    unpublish (also from pending_update)
//!                        ▼
//!                     offline ──reactivate──▶ draft
//! ```
//!
//! Deletion is only valid from `draft` and `offline`: a live resource must
//! be taken offline before it can be removed. Any request not in the table
//! fails with [`CuratorError::InvalidTransition`] and leaves the state
//! untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CuratorError, Result};
use crate::item::LifecycleState;

/// An action requested against the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LifecycleAction {
    /// Make the current payload live
    Publish,
    /// A save landed with edits (live items move to `pending_update`)
    EditSaved,
    /// Take a live item down, retaining payload and history
    Unpublish,
    /// Bring an offline item back into the edit cycle (not live)
    Reactivate,
    /// Remove the item entirely
    Delete,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            LifecycleAction::Publish => "publish",
            LifecycleAction::EditSaved => "save edits to",
            LifecycleAction::Unpublish => "unpublish",
            LifecycleAction::Reactivate => "reactivate",
            LifecycleAction::Delete => "delete",
        };
        write!(f, "{}", verb)
    }
}

/// Resolve the state an item moves to when `action` is applied in state
/// `current`.
///
/// For [`LifecycleAction::Delete`] the returned state is `current` itself -
/// the table only rules on whether deletion is allowed; removal from the
/// collection is the coordinator's job.
pub fn next_state(current: LifecycleState, action: LifecycleAction) -> Result<LifecycleState> {
    use LifecycleAction::*;
    use LifecycleState::*;

    let next = match (current, action) {
        (Draft, Publish) | (PendingUpdate, Publish) => Published,
        (Published, EditSaved) => PendingUpdate,
        (PendingUpdate, EditSaved) => PendingUpdate,
        (Published, Unpublish) | (PendingUpdate, Unpublish) => Offline,
        (Offline, Reactivate) => Draft,
        (Draft, Delete) | (Offline, Delete) => current,
        (from, action) => return Err(CuratorError::InvalidTransition { from, action }),
    };
    Ok(next)
}

/// Whether an item in `state` may be deleted without unpublishing first.
pub fn can_delete(state: LifecycleState) -> bool {
    next_state(state, LifecycleAction::Delete).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleAction::*;
    use LifecycleState::*;

    #[test]
    fn test_publish_transitions() {
        assert_eq!(next_state(Draft, Publish).unwrap(), Published);
        assert_eq!(next_state(PendingUpdate, Publish).unwrap(), Published);
    }

    #[test]
    fn test_edit_saved_transitions() {
        assert_eq!(next_state(Published, EditSaved).unwrap(), PendingUpdate);
        assert_eq!(next_state(PendingUpdate, EditSaved).unwrap(), PendingUpdate);
    }

    #[test]
    fn test_unpublish_transitions() {
        assert_eq!(next_state(Published, Unpublish).unwrap(), Offline);
        assert_eq!(next_state(PendingUpdate, Unpublish).unwrap(), Offline);
    }

    #[test]
    fn test_reactivate_returns_to_draft() {
        assert_eq!(next_state(Offline, Reactivate).unwrap(), Draft);
    }

    #[test]
    fn test_live_items_cannot_be_deleted() {
        for state in [Published, PendingUpdate] {
            let err = next_state(state, Delete).unwrap_err();
            assert_eq!(
                err,
                CuratorError::InvalidTransition {
                    from: state,
                    action: Delete
                }
            );
            assert!(!can_delete(state));
        }
    }

    #[test]
    fn test_draft_and_offline_are_deletable() {
        assert!(can_delete(Draft));
        assert!(can_delete(Offline));
        assert_eq!(next_state(Draft, Delete).unwrap(), Draft);
        assert_eq!(next_state(Offline, Delete).unwrap(), Offline);
    }

    #[test]
    fn test_invalid_requests_are_rejected() {
        assert!(next_state(Draft, Unpublish).is_err());
        assert!(next_state(Draft, EditSaved).is_err());
        assert!(next_state(Draft, Reactivate).is_err());
        assert!(next_state(Published, Publish).is_err());
        assert!(next_state(Published, Reactivate).is_err());
        assert!(next_state(Offline, EditSaved).is_err());
        assert!(next_state(Offline, Unpublish).is_err());
        assert!(next_state(Offline, Publish).is_err());
    }
}
