//! 核心模块 - 配置

pub mod config;

pub use config::{Config, RemoteConfig};
