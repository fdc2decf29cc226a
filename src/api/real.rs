//! real 后端
//!
//! 通过 reqwest 访问 `/api/v1` HTTP 服务，收发统一的响应信封
//! `{ success, message, data }`。登录后持有 Bearer token，
//! 后续写操作自动附带。

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthData, Comment, NewQuestion, Question, QuestionUpdate, User};
use crate::server::response::Envelope;

/// real API 客户端
pub struct RealApi {
    http: reqwest::Client,
    base_url: String,
    // (当前用户, token)
    session: RwLock<Option<(User, String)>>,
}

impl RealApi {
    /// 从配置创建 real 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some((_, token)) = self
            .session
            .read()
            .expect("session lock poisoned")
            .as_ref()
        {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// 发送请求并拆信封：HTTP 错误或 success=false 都翻译为 ApiError
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::server(format!("请求发送失败: {e}")))?;
        let status = response.status();
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::server(format!("响应解析失败: {e}")))?;
        if !status.is_success() || !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "Server error. Please try again.".to_string());
            debug!("[real] 请求失败: {} {}", status, message);
            return Err(ApiError::from_status(status.as_u16(), message));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::server("响应信封缺少 data 字段"))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    /// 写操作没有有意义的返回体时，只检查信封是否成功
    async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::server(format!("请求发送失败: {e}")))?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let envelope: Envelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::server(format!("响应解析失败: {e}")))?;
        if !status.is_success() || !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "Server error. Please try again.".to_string());
            return Err(ApiError::from_status(status.as_u16(), message));
        }
        Ok(())
    }

    async fn authenticate(&self, path: &str, username: &str, password: &str) -> ApiResult<User> {
        let auth: AuthData = self
            .send_json(
                Method::POST,
                path,
                &json!({ "username": username, "password": password }),
            )
            .await?;
        *self.session.write().expect("session lock poisoned") =
            Some((auth.user.clone(), auth.token));
        Ok(auth.user)
    }
}

#[async_trait]
impl ApiClient for RealApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        self.authenticate("/auth/login", username, password).await
    }

    async fn signup(&self, username: &str, password: &str) -> ApiResult<User> {
        self.authenticate("/auth/signup", username, password).await
    }

    async fn logout(&self) -> ApiResult<()> {
        // 后端会话无状态可失败，本地会话无条件清除
        let result = self.send_unit(self.request(Method::POST, "/auth/logout")).await;
        *self.session.write().expect("session lock poisoned") = None;
        result
    }

    async fn current_user(&self) -> Option<User> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|(user, _)| user.clone())
    }

    async fn fetch_questions(&self) -> ApiResult<Vec<Question>> {
        self.send(self.request(Method::GET, "/questions")).await
    }

    async fn fetch_question(&self, id: &str) -> ApiResult<Question> {
        self.send(self.request(Method::GET, &format!("/questions/{id}")))
            .await
    }

    async fn create_question(&self, input: NewQuestion) -> ApiResult<Question> {
        self.send_json(Method::POST, "/questions", &input).await
    }

    async fn update_question(&self, id: &str, update: QuestionUpdate) -> ApiResult<Question> {
        self.send_json(Method::PUT, &format!("/questions/{id}"), &update)
            .await
    }

    async fn delete_question(&self, id: &str) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/questions/{id}")))
            .await
    }

    async fn search_questions(&self, query: &str) -> ApiResult<Vec<Question>> {
        let builder = self
            .request(Method::GET, "/questions/search")
            .query(&[("q", query)]);
        self.send(builder).await
    }

    async fn related_questions(&self, id: &str, limit: usize) -> ApiResult<Vec<Question>> {
        let builder = self
            .request(Method::GET, &format!("/questions/{id}/related"))
            .query(&[("limit", limit)]);
        self.send(builder).await
    }

    async fn hot_questions(&self, limit: usize) -> ApiResult<Vec<Question>> {
        let builder = self
            .request(Method::GET, "/questions/hot")
            .query(&[("limit", limit)]);
        self.send(builder).await
    }

    async fn add_comment(&self, question_id: &str, content: &str) -> ApiResult<Comment> {
        self.send_json(
            Method::POST,
            &format!("/questions/{question_id}/comments"),
            &json!({ "content": content }),
        )
        .await
    }

    async fn update_comment(
        &self,
        question_id: &str,
        comment_id: &str,
        content: &str,
    ) -> ApiResult<Comment> {
        self.send_json(
            Method::PUT,
            &format!("/questions/{question_id}/comments/{comment_id}"),
            &json!({ "content": content }),
        )
        .await
    }

    async fn delete_comment(&self, question_id: &str, comment_id: &str) -> ApiResult<()> {
        self.send_unit(self.request(
            Method::DELETE,
            &format!("/questions/{question_id}/comments/{comment_id}"),
        ))
        .await
    }
}
