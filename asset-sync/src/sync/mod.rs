//! Sync Engine
//!
//! Reconciles the local store with the remote backend: pushes pending
//! records, fills local gaps from the remote set, and keeps each record's
//! sync state consistent with the last known push outcome.

mod engine;
mod error;

pub use engine::{PullReport, SyncEngine};
pub use error::SyncError;
