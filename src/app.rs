//! 应用装配与启动

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::server::{app_router, AppState};
use crate::store::MemoryStore;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = if config.seed_data {
            let store = MemoryStore::with_seed_data();
            info!("✓ 已加载 {} 条演示问题", store.question_count());
            store
        } else {
            MemoryStore::new()
        };

        Ok(Self {
            state: AppState::new(Arc::new(store)),
            config,
        })
    }

    /// 运行 HTTP 服务直至进程退出
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .with_context(|| format!("监听地址绑定失败: {}", self.config.listen_addr))?;
        let addr = listener.local_addr().context("获取监听地址失败")?;
        info!("🚀 服务启动: http://{}/api/v1", addr);

        axum::serve(listener, app_router(self.state))
            .await
            .context("HTTP 服务异常退出")?;
        Ok(())
    }
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 问答服务启动");
    info!("📊 API 模式: {} / 监听: {}", config.api_mode, config.listen_addr);
    info!("{}", "=".repeat(60));
}
