//! Unified error types for curator operations.
//!
//! Every failure crossing the public API boundary is a typed `CuratorError`
//! variant; nothing panics across that boundary. "Confirmation required" is
//! deliberately not an error - it is the
//! [`DeletionPlan::NeedsConfirmation`](crate::coordinator::DeletionPlan)
//! outcome, since it is retryable with user input rather than a bug.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::item::LifecycleState;
use crate::lifecycle::LifecycleAction;

/// Unified error type for curator operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CuratorError {
    /// Requested lifecycle move is not in the transition table.
    /// The item is left unchanged.
    #[error("cannot {action} an item in state '{from}'")]
    InvalidTransition {
        /// State the item was in when the transition was requested
        from: LifecycleState,
        /// The rejected action
        action: LifecycleAction,
    },

    /// Publish was requested but the payload already matches the published
    /// payload and the item is not a draft.
    #[error("nothing to publish for '{0}': payload already matches the live version")]
    NothingToPublish(String),

    /// The referenced item id does not exist in the supplied library.
    #[error("content item '{0}' not found")]
    NotFound(String),

    /// The referenced version sequence does not exist in the ledger.
    #[error("no version {sequence} recorded for '{item_id}'")]
    VersionNotFound {
        /// Item whose history was searched
        item_id: String,
        /// The missing sequence number
        sequence: u64,
    },

    /// An item with this id already exists in the library.
    #[error("content item '{0}' already exists")]
    DuplicateId(String),
}

/// Result type alias for curator operations
pub type Result<T> = std::result::Result<T, CuratorError>;

/// A serializable representation of CuratorError for IPC with the admin UI
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
    /// Associated item id (if applicable)
    pub item_id: Option<String>,
}

impl From<&CuratorError> for SerializableError {
    fn from(err: &CuratorError) -> Self {
        let kind = match err {
            CuratorError::InvalidTransition { .. } => "InvalidTransition",
            CuratorError::NothingToPublish(_) => "NothingToPublish",
            CuratorError::NotFound(_) => "NotFound",
            CuratorError::VersionNotFound { .. } => "VersionNotFound",
            CuratorError::DuplicateId(_) => "DuplicateId",
        }
        .to_string();

        let item_id = match err {
            CuratorError::NothingToPublish(id)
            | CuratorError::NotFound(id)
            | CuratorError::DuplicateId(id) => Some(id.clone()),
            CuratorError::VersionNotFound { item_id, .. } => Some(item_id.clone()),
            CuratorError::InvalidTransition { .. } => None,
        };

        Self {
            kind,
            message: err.to_string(),
            item_id,
        }
    }
}

impl From<CuratorError> for SerializableError {
    fn from(err: CuratorError) -> Self {
        SerializableError::from(&err)
    }
}

impl CuratorError {
    /// Convert to a serializable representation for IPC
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}
