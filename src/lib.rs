//! 问答平台核心库
//!
//! 分层结构：
//! - ① 数据层：`models` 定义问题/评论/用户，`store` 提供内存仓库
//! - ② 业务能力层：`services` 承载校验规则与相关度/热门打分
//! - ③ API 门面层：`api` 暴露统一的 `ApiClient`，mock/fake/real 三种后端可互换
//! - ④ HTTP 服务层：`server` 是 real 模式的对端，axum 实现的 `/api/v1`
//!
//! 库内不做任何持久化，进程退出即数据消失。

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod server;
pub mod services;
pub mod store;

pub use api::{client_from_config, ApiClient, FakeApi, MockApi, RealApi};
pub use app::App;
pub use config::{ApiMode, Config};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use models::{Comment, Question, QuestionStatus, User};
pub use store::{MemoryStore, Store};
