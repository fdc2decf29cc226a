//! 程序配置
//!
//! 加载顺序：内置默认值 → `config.toml`（若存在）→ 环境变量覆盖。

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

/// API 门面的后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// 随机延迟 + 随机失败注入，用于演练 UI 错误态
    Fake,
    /// 直连内存仓库，固定短延迟
    Mock,
    /// 通过 HTTP 访问真实后端
    Real,
}

impl FromStr for ApiMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fake" => Ok(ApiMode::Fake),
            "mock" => Ok(ApiMode::Mock),
            "real" => Ok(ApiMode::Real),
            other => anyhow::bail!("未知的 API 模式: {other}"),
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMode::Fake => write!(f, "fake"),
            ApiMode::Mock => write!(f, "mock"),
            ApiMode::Real => write!(f, "real"),
        }
    }
}

/// 程序配置文件
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API 门面模式：fake | mock | real
    pub api_mode: ApiMode,
    /// real 模式访问的后端地址
    pub api_base_url: String,
    /// HTTP 服务监听地址
    pub listen_addr: String,
    /// 是否预置演示数据
    pub seed_data: bool,
    /// fake 层注入延迟的下界（毫秒）
    pub fake_min_delay_ms: u64,
    /// fake 层注入延迟的上界（毫秒）
    pub fake_max_delay_ms: u64,
    /// fake 层随机失败率（0.0 - 1.0）
    pub fake_failure_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_mode: ApiMode::Mock,
            api_base_url: "http://127.0.0.1:8080/api/v1".to_string(),
            listen_addr: "127.0.0.1:8080".to_string(),
            seed_data: true,
            fake_min_delay_ms: 100,
            fake_max_delay_ms: 600,
            fake_failure_rate: 0.05,
        }
    }
}

impl Config {
    /// 从 TOML 配置文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }

    /// 加载配置：默认值 + config.toml + 环境变量
    pub fn from_env() -> Self {
        let base = Config::from_file("config.toml").unwrap_or_default();
        Self {
            api_mode: std::env::var("API_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.api_mode),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(base.api_base_url),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(base.listen_addr),
            seed_data: std::env::var("SEED_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.seed_data),
            fake_min_delay_ms: std::env::var("FAKE_MIN_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.fake_min_delay_ms),
            fake_max_delay_ms: std::env::var("FAKE_MAX_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.fake_max_delay_ms),
            fake_failure_rate: std::env::var("FAKE_FAILURE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.fake_failure_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_mock() {
        let config = Config::default();
        assert_eq!(config.api_mode, ApiMode::Mock);
        assert!(config.seed_data);
    }

    #[test]
    fn test_api_mode_from_str() {
        assert_eq!("fake".parse::<ApiMode>().unwrap(), ApiMode::Fake);
        assert_eq!(" Real ".parse::<ApiMode>().unwrap(), ApiMode::Real);
        assert!("prod".parse::<ApiMode>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("api_mode = \"fake\"").unwrap();
        assert_eq!(config.api_mode, ApiMode::Fake);
        assert_eq!(config.fake_max_delay_ms, 600);
    }
}
