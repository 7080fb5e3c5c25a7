//! Data models
//!
//! Shared between the sync core and its callers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Local IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod asset;
pub mod asset_complete;
pub mod sync;
pub mod wire_time;

// Re-exports
pub use asset::*;
pub use asset_complete::*;
pub use sync::*;
