use super::SyncError;
use crate::mapper::{to_local_shape, to_remote_shape};
use crate::remote::{RemoteResult, RemoteStore};
use crate::store::LocalStore;
use shared::models::{AssetRecord, AssetRecordComplete, SyncResult, SyncState};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Records inserted locally by a gap-filling pull
#[derive(Debug, Default, Clone)]
pub struct PullReport {
    pub inserted: Vec<AssetRecord>,
    pub errors: Vec<String>,
}

impl PullReport {
    /// Counts for aggregation with a push phase
    pub fn to_result(&self) -> SyncResult {
        let mut result = SyncResult::default();
        for _ in &self.inserted {
            result.record_success();
        }
        for message in &self.errors {
            result.record_failure(message.clone());
        }
        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PushMode {
    /// Update rows the backend already knows, insert the rest
    Upsert,
    /// Always insert (bulk upload of local records)
    InsertOnly,
}

/// Local/remote reconciliation
///
/// Remote failures never escape as errors: they become a per-record `error`
/// state plus a message in the returned [`SyncResult`].
pub struct SyncEngine {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    shutdown: CancellationToken,
}

impl SyncEngine {
    pub fn new(local: Arc<dyn LocalStore>, remote: Arc<dyn RemoteStore>) -> Self {
        Self::with_cancellation(local, remote, CancellationToken::new())
    }

    pub fn with_cancellation(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            local,
            remote,
            shutdown,
        }
    }

    pub fn local(&self) -> &Arc<dyn LocalStore> {
        &self.local
    }

    pub fn remote(&self) -> &Arc<dyn RemoteStore> {
        &self.remote
    }

    /// Abandon in-flight remote calls; their records keep their prior state
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Push every pending record, continuing past individual failures
    pub async fn push_pending(&self) -> SyncResult {
        self.run_phase(PushMode::Upsert).await
    }

    /// Insert-only upload of every pending record
    pub async fn upload_pending(&self) -> SyncResult {
        self.run_phase(PushMode::InsertOnly).await
    }

    async fn run_phase(&self, mode: PushMode) -> SyncResult {
        match self.push_phase(mode).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Push phase aborted");
                SyncResult::failed(format!("Sync failed: {e}"))
            }
        }
    }

    async fn push_phase(&self, mode: PushMode) -> Result<SyncResult, SyncError> {
        let pending = self.local.list_by_sync_state(SyncState::Pending).await?;
        tracing::info!(pending = pending.len(), ?mode, "Pushing pending assets");

        let mut result = SyncResult::default();
        for asset in &pending {
            let Some(outcome) = self.push_remote(asset, mode).await else {
                tracing::info!(asset_id = asset.id, "Push cancelled, leaving state untouched");
                return Err(SyncError::Cancelled);
            };

            let state = match &outcome {
                Ok(_) => SyncState::Synced,
                Err(_) => SyncState::Error,
            };
            if let Err(e) = self.local.update_sync_state(asset.id, state).await {
                tracing::warn!(asset_id = asset.id, error = %e, "Failed to record sync state");
                result.record_failure(format!("Error syncing asset {}: {e}", asset.name));
                continue;
            }

            match outcome {
                Ok(_) => {
                    tracing::debug!(asset_id = asset.id, sync_state = %state, "Asset pushed");
                    result.record_success();
                }
                Err(e) => {
                    tracing::warn!(asset_id = asset.id, error = %e, "Failed to push asset");
                    result.record_failure(format!("Failed to sync asset: {} ({e})", asset.name));
                }
            }
        }

        tracing::info!(
            synced = result.synced_count,
            errors = result.error_count,
            "Push phase finished"
        );
        Ok(result)
    }

    /// Insert remote records whose id is missing locally
    ///
    /// Existing local records are never touched, even when the remote copy
    /// differs.
    pub async fn pull_new(&self) -> Result<PullReport, SyncError> {
        let remote = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(SyncError::Cancelled),
            rows = self.remote.list_all() => rows?,
        };
        let known: HashSet<i64> = self
            .local
            .list_all()
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let mut report = PullReport::default();
        for row in remote.iter().filter(|r| r.id != 0 && !known.contains(&r.id)) {
            let mut asset = to_local_shape(row);
            asset.sync_state = SyncState::Synced;
            match self.local.insert(&asset).await {
                Ok(Some(id)) => {
                    asset.id = id;
                    report.inserted.push(asset);
                }
                // Inserted concurrently since the snapshot
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(asset_id = row.id, error = %e, "Failed to store pulled asset");
                    report
                        .errors
                        .push(format!("Error downloading asset {}: {e}", asset.name));
                }
            }
        }

        tracing::info!(
            remote = remote.len(),
            inserted = report.inserted.len(),
            "Pull phase finished"
        );
        Ok(report)
    }

    /// Push then pull; a fatal phase failure becomes a single-error result
    pub async fn sync_all(&self) -> SyncResult {
        let mut result = match self.push_phase(PushMode::Upsert).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Sync aborted during push");
                return SyncResult::failed(format!("Sync failed: {e}"));
            }
        };

        match self.pull_new().await {
            Ok(report) => result.merge(report.to_result()),
            Err(e) => {
                tracing::error!(error = %e, "Sync aborted during pull");
                return SyncResult::failed(format!("Sync failed: {e}"));
            }
        }

        tracing::info!(
            success = result.success,
            synced = result.synced_count,
            errors = result.error_count,
            "Sync finished"
        );
        result
    }

    /// Push a single record and record the outcome on it and in the store
    ///
    /// An unsaved record (`id == 0`) is inserted remotely; its local state is
    /// only set on the value. A cancelled push changes nothing.
    pub async fn sync_one(&self, asset: &mut AssetRecord) -> bool {
        let state = match self.push_remote(asset, PushMode::Upsert).await {
            None => {
                tracing::debug!(asset_id = asset.id, "Push cancelled, leaving state untouched");
                return false;
            }
            Some(Ok(_)) => SyncState::Synced,
            Some(Err(e)) => {
                tracing::warn!(asset_id = asset.id, error = %e, "Failed to push asset");
                SyncState::Error
            }
        };

        asset.sync_state = state;
        if asset.is_persisted()
            && let Err(e) = self.local.update_sync_state(asset.id, state).await
        {
            tracing::warn!(asset_id = asset.id, error = %e, "Failed to record sync state");
        }
        state == SyncState::Synced
    }

    /// Whole remote set in local shape; remote failure yields an empty list
    pub async fn download_all(&self) -> Vec<AssetRecord> {
        match self.remote.list_all().await {
            Ok(rows) => rows.iter().map(to_local_shape).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to download remote assets");
                Vec::new()
            }
        }
    }

    /// `None` when cancelled before the remote answered
    async fn push_remote(
        &self,
        asset: &AssetRecord,
        mode: PushMode,
    ) -> Option<RemoteResult<AssetRecordComplete>> {
        let mut shape = to_remote_shape(asset);
        shape.sync_state = SyncState::Synced;

        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => None,
            result = self.write_remote(&shape, mode) => Some(result),
        }
    }

    async fn write_remote(
        &self,
        shape: &AssetRecordComplete,
        mode: PushMode,
    ) -> RemoteResult<AssetRecordComplete> {
        if shape.id == 0 || mode == PushMode::InsertOnly {
            return self.remote.insert(shape).await;
        }
        match self.remote.update(shape).await {
            Err(e) if e.is_not_found() => {
                tracing::debug!(asset_id = shape.id, "Remote row missing, inserting");
                self.remote.insert(shape).await
            }
            other => other,
        }
    }
}
