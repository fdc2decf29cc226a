//! 错误类型定义
//!
//! 所有错误统一为 `{code, message, details}` 值对象，
//! 前端按 code 映射本地化文案，HTTP 层按 code 映射状态码。
//! 错误不会被自动重试，fake 层注入的失败会原样向上传递。

use serde::{Deserialize, Serialize};

/// 错误码
///
/// 分为四类：校验（400）、凭证（401）、越权（403）、未找到（404），
/// 以及兜底的服务器错误（500）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TitleRequired,
    TitleTooShort,
    TitleTooLong,
    DescriptionRequired,
    DescriptionTooShort,
    DescriptionTooLong,
    CommentRequired,
    CommentTooShort,
    CommentTooLong,
    UsernameRequired,
    PasswordRequired,
    UsernameExists,
    InvalidCredentials,
    QuestionNotFound,
    CommentNotFound,
    Unauthorized,
    ServerError,
}

impl ErrorCode {
    /// 默认的用户可见文案
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::TitleRequired => "Title is required",
            ErrorCode::TitleTooShort => "Title must be at least 5 characters",
            ErrorCode::TitleTooLong => "Title must be less than 200 characters",
            ErrorCode::DescriptionRequired => "Description is required",
            ErrorCode::DescriptionTooShort => "Description must be at least 10 characters",
            ErrorCode::DescriptionTooLong => "Description must be less than 5000 characters",
            ErrorCode::CommentRequired => "Comment content is required",
            ErrorCode::CommentTooShort => "Comment must be at least 3 characters",
            ErrorCode::CommentTooLong => "Comment must be less than 1000 characters",
            ErrorCode::UsernameRequired => "Username is required",
            ErrorCode::PasswordRequired => "Password is required",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::QuestionNotFound => "Question not found",
            ErrorCode::CommentNotFound => "Comment not found",
            ErrorCode::Unauthorized => "You are not authorized to perform this action",
            ErrorCode::ServerError => "Internal server error",
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::TitleRequired
            | ErrorCode::TitleTooShort
            | ErrorCode::TitleTooLong
            | ErrorCode::DescriptionRequired
            | ErrorCode::DescriptionTooShort
            | ErrorCode::DescriptionTooLong
            | ErrorCode::CommentRequired
            | ErrorCode::CommentTooShort
            | ErrorCode::CommentTooLong
            | ErrorCode::UsernameRequired
            | ErrorCode::PasswordRequired
            | ErrorCode::UsernameExists => 400,
            ErrorCode::InvalidCredentials => 401,
            ErrorCode::Unauthorized => 403,
            ErrorCode::QuestionNotFound | ErrorCode::CommentNotFound => 404,
            ErrorCode::ServerError => 500,
        }
    }
}

/// API 错误值对象
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// 创建带自定义文案的错误
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// 创建兜底的服务器错误
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServerError, message)
    }

    /// 由 HTTP 状态码还原错误（real 客户端用）
    ///
    /// 响应体中只携带 message，code 按状态码类别还原。
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 => ErrorCode::InvalidCredentials,
            403 => ErrorCode::Unauthorized,
            404 => ErrorCode::QuestionNotFound,
            _ => ErrorCode::ServerError,
        };
        Self::new(code, message)
    }

    /// 对应的 HTTP 状态码
    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }
}

/// 统一的结果类型别名
pub type ApiResult<T> = Result<T, ApiError>;
