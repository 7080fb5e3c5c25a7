use crate::db::repository::RepoError;
use crate::remote::RemoteError;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Fatal failure of a whole sync phase
///
/// Per-record failures never become a `SyncError`; they are recorded in the
/// phase's [`shared::SyncResult`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("local store: {0}")]
    Local(#[from] RepoError),

    #[error("remote store: {0}")]
    Remote(#[from] RemoteError),

    #[error("sync cancelled")]
    Cancelled,
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Local(e) => e.into(),
            SyncError::Remote(e) => e.into(),
            SyncError::Cancelled => AppError::new(ErrorCode::SyncCancelled),
        }
    }
}
