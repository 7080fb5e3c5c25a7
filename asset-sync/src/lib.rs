//! Asset Sync - 资产登记本地/远端同步核心
//!
//! # 模块结构
//!
//! ```text
//! asset-sync/src/
//! ├── core/       # 配置
//! ├── db/         # SQLite 连接池与仓储
//! ├── store/      # 本地存储端口 (allAssets 订阅)
//! ├── remote/     # 远端存储端口 (PostgREST / 不可用)
//! ├── mapper.rs   # 本地/远端模型转换
//! ├── sync/       # 同步引擎
//! ├── services/   # AssetService 门面
//! ├── import/     # CSV 导入导出
//! └── utils/      # 日志、错误类型
//! ```

pub mod core;
pub mod db;
pub mod import;
pub mod mapper;
pub mod remote;
pub mod services;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, RemoteConfig};
pub use db::DbService;
pub use remote::{PostgrestRemote, RemoteError, RemoteStore, UnavailableRemote};
pub use services::{AssetService, SyncHandle};
pub use store::{LocalStore, SqliteAssetStore};
pub use sync::{PullReport, SyncEngine, SyncError};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

use std::sync::Arc;

/// 设置运行环境 (dotenv + 日志)，返回加载的配置
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

/// Remote adapter for the configuration; unavailable when unconfigured
pub fn build_remote(config: &Config) -> AppResult<Arc<dyn RemoteStore>> {
    match config.remote() {
        Some(remote) => {
            tracing::info!(url = %remote.base_url, table = %remote.table, "Remote backend configured");
            Ok(Arc::new(PostgrestRemote::new(&remote)?))
        }
        None => {
            tracing::warn!("REMOTE_URL not set, running offline");
            Ok(Arc::new(UnavailableRemote))
        }
    }
}

/// Open the local store and wire engine and service together
pub async fn build_service(config: &Config) -> AppResult<AssetService> {
    let db = DbService::new(&config.db_path).await?;
    let store: Arc<dyn LocalStore> = Arc::new(SqliteAssetStore::new(db).await?);
    let engine = SyncEngine::new(store, build_remote(config)?);
    Ok(AssetService::new(Arc::new(engine)).with_remote_delete(config.propagate_remote_delete))
}
