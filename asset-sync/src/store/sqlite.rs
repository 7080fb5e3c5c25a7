use super::LocalStore;
use crate::db::DbService;
use crate::db::repository::{RepoResult, asset};
use async_trait::async_trait;
use shared::models::{AssetRecord, AssetStatus, SyncState};
use sqlx::SqlitePool;
use tokio::sync::watch;

/// [`LocalStore`] backed by the SQLite `assets` table
pub struct SqliteAssetStore {
    pool: SqlitePool,
    all_assets: watch::Sender<Vec<AssetRecord>>,
}

impl SqliteAssetStore {
    /// Wrap an opened database and seed the `allAssets` channel
    pub async fn new(db: DbService) -> RepoResult<Self> {
        let initial = asset::find_all(&db.pool).await?;
        let (all_assets, _) = watch::channel(initial);
        Ok(Self {
            pool: db.pool,
            all_assets,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn publish(&self) {
        match asset::find_all(&self.pool).await {
            Ok(list) => {
                self.all_assets.send_replace(list);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to refresh asset list"),
        }
    }
}

#[async_trait]
impl LocalStore for SqliteAssetStore {
    async fn list_all(&self) -> RepoResult<Vec<AssetRecord>> {
        asset::find_all(&self.pool).await
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<AssetRecord>> {
        asset::find_by_id(&self.pool, id).await
    }

    async fn list_by_category(&self, category: &str) -> RepoResult<Vec<AssetRecord>> {
        asset::find_by_category(&self.pool, category).await
    }

    async fn list_by_status(&self, status: AssetStatus) -> RepoResult<Vec<AssetRecord>> {
        asset::find_by_status(&self.pool, status).await
    }

    async fn list_by_sync_state(&self, state: SyncState) -> RepoResult<Vec<AssetRecord>> {
        asset::find_by_sync_state(&self.pool, state).await
    }

    async fn insert(&self, record: &AssetRecord) -> RepoResult<Option<i64>> {
        let id = asset::create(&self.pool, record).await?;
        if id.is_some() {
            self.publish().await;
        }
        Ok(id)
    }

    async fn update(&self, record: &AssetRecord) -> RepoResult<()> {
        asset::update(&self.pool, record).await?;
        self.publish().await;
        Ok(())
    }

    async fn update_sync_state(&self, id: i64, state: SyncState) -> RepoResult<bool> {
        let updated = asset::update_sync_state(&self.pool, id, state).await?;
        if updated {
            self.publish().await;
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let deleted = asset::delete(&self.pool, id).await?;
        if deleted {
            self.publish().await;
        }
        Ok(deleted)
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let removed = asset::delete_all(&self.pool).await?;
        self.publish().await;
        Ok(removed)
    }

    fn subscribe(&self) -> watch::Receiver<Vec<AssetRecord>> {
        self.all_assets.subscribe()
    }
}
