//! Shared types for the asset register
//!
//! Data model for the local and remote asset shapes, the sync result
//! aggregate, and the unified error types.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{AssetRecord, AssetRecordComplete, AssetStatus, SyncResult, SyncState};
pub use serde::{Deserialize, Serialize};
