//! 端点处理器
//!
//! 共享的会话提取逻辑放在这里，业务规则按资源分文件。

pub mod auth;
pub mod comments;
pub mod questions;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::error::{ApiResult, ErrorCode};
use crate::models::User;
use crate::server::AppState;

/// 从 `Authorization: Bearer <token>` 解析当前用户
///
/// 缺头、格式不对、token 不在会话表中，一律 UNAUTHORIZED。
pub fn bearer_user(state: &AppState, headers: &HeaderMap) -> ApiResult<User> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ErrorCode::Unauthorized)?;
    state
        .sessions
        .read()
        .expect("sessions lock poisoned")
        .get(token)
        .cloned()
        .ok_or_else(|| ErrorCode::Unauthorized.into())
}

/// 校验"请求者即资源所有者"
pub fn require_owner(user: &User, owner_id: Option<String>, missing: ErrorCode) -> ApiResult<()> {
    let owner_id = owner_id.ok_or(missing)?;
    if owner_id != user.id {
        return Err(ErrorCode::Unauthorized.into());
    }
    Ok(())
}
