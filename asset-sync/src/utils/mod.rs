//! 工具模块 - 日志与通用类型
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`logger`] - tracing 初始化

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use shared::util::now_millis;
