//! Remote store port
//!
//! Every remote call returns an explicit [`RemoteResult`]; a missing backend
//! configuration is the [`UnavailableRemote`] adapter, not an absent client.

mod postgrest;
mod unavailable;

pub use postgrest::PostgrestRemote;
pub use unavailable::UnavailableRemote;

use async_trait::async_trait;
use shared::models::{AssetRecordComplete, AssetStatus};
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Remote adapter error
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// No backend configured
    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    /// Transport failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Target row does not exist remotely
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        let code = match &err {
            RemoteError::Unavailable(_) => ErrorCode::RemoteUnavailable,
            RemoteError::Network(_) => ErrorCode::NetworkError,
            RemoteError::Rejected { .. } => ErrorCode::RemoteRejected,
            RemoteError::NotFound(_) => ErrorCode::AssetNotFound,
            RemoteError::Decode(_) => ErrorCode::RemoteDecodeFailed,
        };
        AppError::remote(code, err.to_string())
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote backend capability
///
/// Calls either fully succeed (row committed and echoed back) or fail with no
/// partial write.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert a row; an unset id is assigned by the backend
    async fn insert(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete>;
    /// Update the row with `asset.id`; `NotFound` when it does not exist
    async fn update(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete>;
    /// `false` when nothing was deleted
    async fn delete(&self, id: i64) -> RemoteResult<bool>;
    async fn list_all(&self) -> RemoteResult<Vec<AssetRecordComplete>>;
    async fn get_by_id(&self, id: i64) -> RemoteResult<Option<AssetRecordComplete>>;
    async fn list_by_category(&self, category: &str) -> RemoteResult<Vec<AssetRecordComplete>>;
    async fn list_by_status(&self, status: AssetStatus) -> RemoteResult<Vec<AssetRecordComplete>>;
}
