//! 日志初始化
//!
//! 基于 tracing-subscriber，日志级别由 RUST_LOG 控制，默认 info。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 测试中可能被多次调用，重复初始化会被忽略。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
