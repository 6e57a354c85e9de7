#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Guarded mutation coordination (save/publish/delete/restore)
pub mod coordinator;

/// Snapshot comparison for dirty detection and change summaries
pub mod diff;

/// Error (common error types)
pub mod error;

/// Content item data model
pub mod item;

/// Version history ledger
pub mod ledger;

/// Lifecycle state machine
pub mod lifecycle;

/// Content library (the keyed item collection)
pub mod library;

/// Reference index (which pages consume an item)
pub mod reference;

/// Editor session tracking (dirty/saving state per open editor)
pub mod session;

mod clock;
