//! API 门面层
//!
//! 三种可互换的后端实现，语义一致，只在数据来源与延迟/失败注入上不同：
//! - `mock` - 直连内存仓库，固定短延迟
//! - `fake` - 在 mock 之上注入随机延迟与随机失败，用于演练 UI 错误态
//! - `real` - 通过 reqwest 访问 `/api/v1` 后端
//!
//! 实现由配置在构造时一次性选定（策略注入），
//! 不做调用时的字符串分发。

pub mod fake;
pub mod mock;
pub mod real;

pub use fake::FakeApi;
pub use mock::MockApi;
pub use real::RealApi;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::{ApiMode, Config};
use crate::error::ApiResult;
use crate::models::{Comment, NewQuestion, Question, QuestionUpdate, User};

/// 统一的 API 客户端接口
#[async_trait]
pub trait ApiClient: Send + Sync {
    // ---- 认证（桩实现：任意非空凭证均可通过）----
    async fn login(&self, username: &str, password: &str) -> ApiResult<User>;
    async fn signup(&self, username: &str, password: &str) -> ApiResult<User>;
    async fn logout(&self) -> ApiResult<()>;
    async fn current_user(&self) -> Option<User>;

    // ---- 问题 ----
    async fn fetch_questions(&self) -> ApiResult<Vec<Question>>;
    async fn fetch_question(&self, id: &str) -> ApiResult<Question>;
    async fn create_question(&self, input: NewQuestion) -> ApiResult<Question>;
    async fn update_question(&self, id: &str, update: QuestionUpdate) -> ApiResult<Question>;
    async fn delete_question(&self, id: &str) -> ApiResult<()>;
    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>>;
    async fn related_questions(&self, id: &str, limit: usize) -> ApiResult<Vec<Question>>;
    async fn hot_questions(&self, limit: usize) -> ApiResult<Vec<Question>>;

    // ---- 评论 ----
    async fn add_comment(&self, question_id: &str, content: &str) -> ApiResult<Comment>;
    async fn update_comment(
        &self,
        question_id: &str,
        comment_id: &str,
        content: &str,
    ) -> ApiResult<Comment>;
    async fn delete_comment(&self, question_id: &str, comment_id: &str) -> ApiResult<()>;
}

/// 按配置构造 API 客户端
pub fn client_from_config(config: &Config) -> Arc<dyn ApiClient> {
    match config.api_mode {
        ApiMode::Fake => Arc::new(FakeApi::new(config)),
        ApiMode::Mock => Arc::new(MockApi::new()),
        ApiMode::Real => Arc::new(RealApi::new(config)),
    }
}

/// 时间戳派生的用户 id（mock/fake 桩认证用）
pub(crate) fn mint_user_id() -> String {
    format!("user_{}", Utc::now().timestamp_millis())
}
