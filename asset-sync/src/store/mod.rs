//! Local store port
//!
//! The local store is the source of truth for identifiers. Every mutation
//! publishes the full name-ordered list on a watch channel so callers can
//! observe `allAssets` without polling.

mod sqlite;

pub use sqlite::SqliteAssetStore;

use crate::db::repository::RepoResult;
use async_trait::async_trait;
use shared::models::{AssetRecord, AssetStatus, SyncState};
use tokio::sync::watch;

#[async_trait]
pub trait LocalStore: Send + Sync {
    /// All records ordered by name ascending
    async fn list_all(&self) -> RepoResult<Vec<AssetRecord>>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<AssetRecord>>;
    async fn list_by_category(&self, category: &str) -> RepoResult<Vec<AssetRecord>>;
    async fn list_by_status(&self, status: AssetStatus) -> RepoResult<Vec<AssetRecord>>;
    async fn list_by_sync_state(&self, state: SyncState) -> RepoResult<Vec<AssetRecord>>;

    /// Insert a record; `id == 0` lets the store assign one.
    /// Returns `None` when a row with that id already exists.
    async fn insert(&self, asset: &AssetRecord) -> RepoResult<Option<i64>>;
    async fn update(&self, asset: &AssetRecord) -> RepoResult<()>;
    /// Targeted sync-state write; `false` when the row is gone
    async fn update_sync_state(&self, id: i64, state: SyncState) -> RepoResult<bool>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn delete_all(&self) -> RepoResult<u64>;

    /// Receiver for the current full list, refreshed after each mutation
    fn subscribe(&self) -> watch::Receiver<Vec<AssetRecord>>;
}
