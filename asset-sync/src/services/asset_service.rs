//! AssetService - facade used by the presentation layer
//!
//! Local writes complete before any remote work starts. Remote pushes run on
//! spawned tasks and never fail the caller's save.

use crate::store::LocalStore;
use crate::sync::SyncEngine;
use crate::utils::{AppError, AppResult, ErrorCode, now_millis};
use shared::models::{AssetRecord, AssetStatus, SyncResult, SyncState};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use validator::Validate;

/// Handle to a best-effort background push
///
/// Dropping it detaches the push; awaiting [`SyncHandle::outcome`] yields
/// whether the remote accepted the record.
#[derive(Debug)]
pub struct SyncHandle(JoinHandle<bool>);

impl SyncHandle {
    pub async fn outcome(self) -> bool {
        self.0.await.unwrap_or(false)
    }
}

pub struct AssetService {
    engine: Arc<SyncEngine>,
    propagate_remote_delete: bool,
}

impl AssetService {
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        Self {
            engine,
            propagate_remote_delete: false,
        }
    }

    /// Also delete remotely (best-effort) when a record is deleted locally
    pub fn with_remote_delete(mut self, enabled: bool) -> Self {
        self.propagate_remote_delete = enabled;
        self
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    fn local(&self) -> &Arc<dyn LocalStore> {
        self.engine.local()
    }

    /// Save a new record locally and start a background push
    ///
    /// Returns the identifier assigned by the local store. The record is
    /// readable with state `pending` before this returns.
    pub async fn insert(&self, mut asset: AssetRecord) -> AppResult<(i64, SyncHandle)> {
        validate(&asset)?;

        let now = now_millis();
        asset.created_at = Some(now);
        asset.updated_at = Some(now);
        asset.sync_state = SyncState::Pending;

        let id = self.local().insert(&asset).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::AssetIdExists,
                format!("Asset {} already exists", asset.id),
            )
        })?;
        asset.id = id;
        tracing::info!(asset_id = id, name = %asset.name, "Asset saved locally");

        Ok((id, self.spawn_push(asset)))
    }

    /// Save changes locally, reset the state to pending, push in background
    pub async fn update(&self, mut asset: AssetRecord) -> AppResult<SyncHandle> {
        if !asset.is_persisted() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Cannot update an asset without an id",
            ));
        }
        validate(&asset)?;

        asset.updated_at = Some(now_millis());
        asset.sync_state = SyncState::Pending;
        self.local().update(&asset).await?;
        tracing::info!(asset_id = asset.id, "Asset updated locally");

        Ok(self.spawn_push(asset))
    }

    /// Delete locally; `false` when the record was already gone
    pub async fn delete(&self, asset: &AssetRecord) -> AppResult<bool> {
        let deleted = self.local().delete(asset.id).await?;
        tracing::info!(asset_id = asset.id, deleted, "Asset deleted locally");

        if deleted && self.propagate_remote_delete {
            let remote = self.engine.remote().clone();
            let id = asset.id;
            tokio::spawn(async move {
                match remote.delete(id).await {
                    Ok(true) => tracing::debug!(asset_id = id, "Remote asset deleted"),
                    Ok(false) => tracing::debug!(asset_id = id, "Remote asset already absent"),
                    Err(e) => tracing::warn!(asset_id = id, error = %e, "Remote delete failed"),
                }
            });
        }
        Ok(deleted)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<AssetRecord>> {
        Ok(self.local().get_by_id(id).await?)
    }

    pub async fn list_all(&self) -> AppResult<Vec<AssetRecord>> {
        Ok(self.local().list_all().await?)
    }

    pub async fn query_by_category(&self, category: &str) -> AppResult<Vec<AssetRecord>> {
        Ok(self.local().list_by_category(category).await?)
    }

    pub async fn query_by_status(&self, status: AssetStatus) -> AppResult<Vec<AssetRecord>> {
        Ok(self.local().list_by_status(status).await?)
    }

    /// `allAssets`: current full list, refreshed after every local mutation
    pub fn subscribe(&self) -> watch::Receiver<Vec<AssetRecord>> {
        self.local().subscribe()
    }

    /// User-triggered push of every pending record; number synced
    pub async fn sync_pending_assets(&self) -> u32 {
        let result = self.engine.push_pending().await;
        if !result.success {
            tracing::warn!(errors = result.error_count, "Some assets failed to sync");
        }
        result.synced_count
    }

    pub async fn sync_all(&self) -> SyncResult {
        self.engine.sync_all().await
    }

    /// Cancel in-flight pushes
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_push(&self, mut asset: AssetRecord) -> SyncHandle {
        let engine = self.engine.clone();
        SyncHandle(tokio::spawn(
            async move { engine.sync_one(&mut asset).await },
        ))
    }
}

fn validate(asset: &AssetRecord) -> AppResult<()> {
    asset
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid asset: {e}")))?;
    for (field, value) in [("name", &asset.name), ("category", &asset.category)] {
        if value.trim().is_empty() {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                    .with_detail("field", field),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::remote::UnavailableRemote;
    use crate::store::SqliteAssetStore;

    async fn offline_service() -> AssetService {
        let store = SqliteAssetStore::new(DbService::in_memory().await.unwrap())
            .await
            .unwrap();
        let engine = SyncEngine::new(Arc::new(store), Arc::new(UnavailableRemote));
        AssetService::new(Arc::new(engine))
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_required_fields() {
        let service = offline_service().await;
        let err = service
            .insert(AssetRecord::new("", "Furniture"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = service
            .insert(AssetRecord::new("Chair", "   "))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_insert_saves_and_marks_error() {
        let service = offline_service().await;
        let (id, handle) = service
            .insert(AssetRecord::new("Chair", "Furniture"))
            .await
            .unwrap();
        assert!(id > 0);

        assert!(!handle.outcome().await);
        let stored = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.sync_state, SyncState::Error);
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn test_update_requires_existing_record() {
        let service = offline_service().await;
        let err = service
            .update(AssetRecord::new("Chair", "Furniture"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let mut ghost = AssetRecord::new("Chair", "Furniture");
        ghost.id = 77;
        let err = service.update(ghost).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AssetNotFound);
    }
}
