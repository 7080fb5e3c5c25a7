use super::{RemoteError, RemoteResult, RemoteStore};
use async_trait::async_trait;
use shared::models::{AssetRecordComplete, AssetStatus};

const REASON: &str = "remote backend is not configured";

/// Stand-in used when no backend is configured; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRemote;

fn unavailable<T>() -> RemoteResult<T> {
    Err(RemoteError::Unavailable(REASON.to_string()))
}

#[async_trait]
impl RemoteStore for UnavailableRemote {
    async fn insert(&self, _asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        unavailable()
    }

    async fn update(&self, _asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        unavailable()
    }

    async fn delete(&self, _id: i64) -> RemoteResult<bool> {
        unavailable()
    }

    async fn list_all(&self) -> RemoteResult<Vec<AssetRecordComplete>> {
        unavailable()
    }

    async fn get_by_id(&self, _id: i64) -> RemoteResult<Option<AssetRecordComplete>> {
        unavailable()
    }

    async fn list_by_category(&self, _category: &str) -> RemoteResult<Vec<AssetRecordComplete>> {
        unavailable()
    }

    async fn list_by_status(&self, _status: AssetStatus) -> RemoteResult<Vec<AssetRecordComplete>> {
        unavailable()
    }
}
