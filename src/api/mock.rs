//! mock 后端
//!
//! 直连内存仓库，固定短延迟。校验在此边界完成后才触达仓库；
//! 更新/删除先做所有权检查，再做载荷校验，
//! 保证非所有者无论载荷是否合法都收到 UNAUTHORIZED。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::api::{mint_user_id, ApiClient};
use crate::error::{ApiResult, ErrorCode};
use crate::models::{Comment, NewQuestion, Question, QuestionUpdate, User};
use crate::services::validation::{
    validate_comment, validate_description, validate_password, validate_title, validate_username,
};
use crate::store::{MemoryStore, Store};

/// 读操作的固定延迟
const READ_DELAY: Duration = Duration::from_millis(30);
/// 写操作的固定延迟
const WRITE_DELAY: Duration = Duration::from_millis(50);

/// mock API 客户端
pub struct MockApi {
    store: Arc<MemoryStore>,
    session: Mutex<Option<User>>,
}

impl MockApi {
    /// 创建预置演示数据的 mock 客户端
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::with_seed_data()))
    }

    /// 以给定仓库创建（测试夹具入口）
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            session: Mutex::new(None),
        }
    }

    /// 当前登录用户，未登录时返回 UNAUTHORIZED
    fn require_user(&self) -> ApiResult<User> {
        self.session
            .lock()
            .expect("session lock poisoned")
            .clone()
            .ok_or_else(|| ErrorCode::Unauthorized.into())
    }

    /// 校验"请求者即资源所有者"
    fn require_owner(&self, owner_id: Option<String>, missing: ErrorCode) -> ApiResult<User> {
        let user = self.require_user()?;
        let owner_id = owner_id.ok_or(missing)?;
        if owner_id != user.id {
            return Err(ErrorCode::Unauthorized.into());
        }
        Ok(user)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        sleep(WRITE_DELAY).await;
        validate_username(username)?;
        validate_password(password)?;
        // 桩认证：任意凭证均接受，不检查唯一性，不做哈希
        let user = User {
            id: mint_user_id(),
            username: username.trim().to_string(),
        };
        *self.session.lock().expect("session lock poisoned") = Some(user.clone());
        debug!("[mock] 登录成功: {}", user.username);
        Ok(user)
    }

    async fn signup(&self, username: &str, password: &str) -> ApiResult<User> {
        // 与登录同语义（各前端实现间的差异属于偶然漂移，不保留）
        self.login(username, password).await
    }

    async fn logout(&self) -> ApiResult<()> {
        sleep(READ_DELAY).await;
        *self.session.lock().expect("session lock poisoned") = None;
        Ok(())
    }

    async fn current_user(&self) -> Option<User> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    async fn fetch_questions(&self) -> ApiResult<Vec<Question>> {
        sleep(READ_DELAY).await;
        Ok(self.store.all_questions())
    }

    async fn fetch_question(&self, id: &str) -> ApiResult<Question> {
        sleep(READ_DELAY).await;
        self.store
            .question_by_id(id)
            .ok_or_else(|| ErrorCode::QuestionNotFound.into())
    }

    async fn create_question(&self, input: NewQuestion) -> ApiResult<Question> {
        sleep(WRITE_DELAY).await;
        let user = self.require_user()?;
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        Ok(self
            .store
            .create_question(&input.title, &input.description, &user))
    }

    async fn update_question(&self, id: &str, update: QuestionUpdate) -> ApiResult<Question> {
        sleep(WRITE_DELAY).await;
        // 所有权优先于载荷校验
        self.require_owner(self.store.question_owner(id), ErrorCode::QuestionNotFound)?;
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }
        self.store
            .update_question(id, &update)
            .ok_or_else(|| ErrorCode::QuestionNotFound.into())
    }

    async fn delete_question(&self, id: &str) -> ApiResult<()> {
        sleep(WRITE_DELAY).await;
        self.require_owner(self.store.question_owner(id), ErrorCode::QuestionNotFound)?;
        if !self.store.delete_question(id) {
            return Err(ErrorCode::QuestionNotFound.into());
        }
        Ok(())
    }

    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>> {
        sleep(READ_DELAY).await;
        Ok(self.store.search_questions(query))
    }

    async fn related_questions(&self, id: &str, limit: usize) -> ApiResult<Vec<Question>> {
        sleep(READ_DELAY).await;
        Ok(self.store.related_questions(id, limit))
    }

    async fn hot_questions(&self, limit: usize) -> ApiResult<Vec<Question>> {
        sleep(READ_DELAY).await;
        Ok(self.store.hot_questions(limit))
    }

    async fn add_comment(&self, question_id: &str, content: &str) -> ApiResult<Comment> {
        sleep(WRITE_DELAY).await;
        let user = self.require_user()?;
        validate_comment(content)?;
        self.store
            .add_comment(question_id, content, &user)
            .ok_or_else(|| ErrorCode::QuestionNotFound.into())
    }

    async fn update_comment(
        &self,
        question_id: &str,
        comment_id: &str,
        content: &str,
    ) -> ApiResult<Comment> {
        sleep(WRITE_DELAY).await;
        self.require_owner(
            self.store.comment_owner(comment_id),
            ErrorCode::CommentNotFound,
        )?;
        validate_comment(content)?;
        self.store
            .update_comment(question_id, comment_id, content)
            .ok_or_else(|| ErrorCode::CommentNotFound.into())
    }

    async fn delete_comment(&self, question_id: &str, comment_id: &str) -> ApiResult<()> {
        sleep(WRITE_DELAY).await;
        self.require_owner(
            self.store.comment_owner(comment_id),
            ErrorCode::CommentNotFound,
        )?;
        if !self.store.delete_comment(question_id, comment_id) {
            return Err(ErrorCode::CommentNotFound.into());
        }
        Ok(())
    }
}
