//! fake 后端
//!
//! 语义上委托给 mock，只额外注入：
//! - 随机延迟（默认 100-600 毫秒）
//! - 随机失败（默认 5%，表现为 SERVER_ERROR）
//! - 注册用户名 "admin" 返回 USERNAME_EXISTS（保留的错误路径演示）
//!
//! 两个注入参数都可配置，测试中可归零以获得确定性。

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use crate::api::{ApiClient, MockApi};
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::{Comment, NewQuestion, Question, QuestionUpdate, User};

/// fake API 客户端
pub struct FakeApi {
    inner: MockApi,
    min_delay_ms: u64,
    max_delay_ms: u64,
    failure_rate: f64,
}

impl FakeApi {
    /// 从配置创建 fake 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            inner: MockApi::new(),
            min_delay_ms: config.fake_min_delay_ms,
            max_delay_ms: config.fake_max_delay_ms.max(config.fake_min_delay_ms),
            failure_rate: config.fake_failure_rate.clamp(0.0, 1.0),
        }
    }

    /// 模拟一次网络往返：随机延迟，按失败率随机注入失败
    async fn simulate(&self, inject_failure: bool) -> ApiResult<()> {
        let (delay_ms, failed) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.min_delay_ms..=self.max_delay_ms),
                inject_failure && rng.gen_bool(self.failure_rate),
            )
        };
        sleep(Duration::from_millis(delay_ms)).await;
        if failed {
            debug!("[fake] 注入随机失败");
            return Err(ApiError::server("Server error. Please try again."));
        }
        Ok(())
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        self.simulate(true).await?;
        self.inner.login(username, password).await
    }

    async fn signup(&self, username: &str, password: &str) -> ApiResult<User> {
        self.simulate(true).await?;
        // 错误路径演示：用户名 "admin" 视为已被占用
        if username.trim().eq_ignore_ascii_case("admin") {
            return Err(ErrorCode::UsernameExists.into());
        }
        self.inner.signup(username, password).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.simulate(false).await?;
        self.inner.logout().await
    }

    async fn current_user(&self) -> Option<User> {
        self.inner.current_user().await
    }

    async fn fetch_questions(&self) -> ApiResult<Vec<Question>> {
        self.simulate(true).await?;
        self.inner.fetch_questions().await
    }

    async fn fetch_question(&self, id: &str) -> ApiResult<Question> {
        self.simulate(false).await?;
        self.inner.fetch_question(id).await
    }

    async fn create_question(&self, input: NewQuestion) -> ApiResult<Question> {
        self.simulate(true).await?;
        self.inner.create_question(input).await
    }

    async fn update_question(&self, id: &str, update: QuestionUpdate) -> ApiResult<Question> {
        self.simulate(true).await?;
        self.inner.update_question(id, update).await
    }

    async fn delete_question(&self, id: &str) -> ApiResult<()> {
        self.simulate(true).await?;
        self.inner.delete_question(id).await
    }

    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>> {
        self.simulate(false).await?;
        self.inner.search_questions(query).await
    }

    async fn related_questions(&self, id: &str, limit: usize) -> ApiResult<Vec<Question>> {
        self.simulate(false).await?;
        self.inner.related_questions(id, limit).await
    }

    async fn hot_questions(&self, limit: usize) -> ApiResult<Vec<Question>> {
        self.simulate(false).await?;
        self.inner.hot_questions(limit).await
    }

    async fn add_comment(&self, question_id: &str, content: &str) -> ApiResult<Comment> {
        self.simulate(true).await?;
        self.inner.add_comment(question_id, content).await
    }

    async fn update_comment(
        &self,
        question_id: &str,
        comment_id: &str,
        content: &str,
    ) -> ApiResult<Comment> {
        self.simulate(true).await?;
        self.inner.update_comment(question_id, comment_id, content).await
    }

    async fn delete_comment(&self, question_id: &str, comment_id: &str) -> ApiResult<()> {
        self.simulate(true).await?;
        self.inner.delete_comment(question_id, comment_id).await
    }
}
