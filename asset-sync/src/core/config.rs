/// 同步服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ASSET_DB_PATH | assets.db | 本地 SQLite 数据库文件 |
/// | REMOTE_URL | (未设置) | PostgREST/Supabase 项目地址，未设置时远端不可用 |
/// | REMOTE_API_KEY | (未设置) | API key (apikey + Bearer) |
/// | REMOTE_TABLE | assets | 远端表名 |
/// | REMOTE_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | PROPAGATE_REMOTE_DELETE | false | 本地删除时是否同步删除远端 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// REMOTE_URL=https://xyz.supabase.co REMOTE_API_KEY=... asset-sync sync
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 本地数据库文件路径
    pub db_path: String,
    /// 远端项目地址
    pub remote_url: Option<String>,
    /// 远端 API key
    pub remote_api_key: Option<String>,
    /// 远端表名
    pub remote_table: String,
    /// 请求超时时间 (毫秒)
    pub remote_timeout_ms: u64,
    /// 本地删除是否传播到远端
    pub propagate_remote_delete: bool,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

/// Connection settings for the remote backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        Self {
            db_path: non_empty("ASSET_DB_PATH").unwrap_or_else(|| "assets.db".into()),
            remote_url: non_empty("REMOTE_URL"),
            remote_api_key: non_empty("REMOTE_API_KEY"),
            remote_table: non_empty("REMOTE_TABLE").unwrap_or_else(|| "assets".into()),
            remote_timeout_ms: var("REMOTE_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            propagate_remote_delete: var("PROPAGATE_REMOTE_DELETE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
        }
    }

    /// 远端连接配置；未配置 REMOTE_URL 时返回 None
    pub fn remote(&self) -> Option<RemoteConfig> {
        let base_url = self.remote_url.as_ref()?;
        Some(RemoteConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: self.remote_api_key.clone().unwrap_or_default(),
            table: self.remote_table.clone(),
            timeout_ms: self.remote_timeout_ms,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
