//! 认证端点
//!
//! 桩认证：任意非空凭证都接受，用户 id 由时间戳派生，
//! token 仅是 `tok_<user_id>` 形式的不透明字符串。

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::error::ApiResult;
use crate::models::{AuthData, Credentials, User};
use crate::server::{response, AppState};
use crate::services::validation::{validate_password, validate_username};

fn mint_session(state: &AppState, username: &str) -> AuthData {
    let user = User {
        id: format!("user_{}", Utc::now().timestamp_millis()),
        username: username.trim().to_string(),
    };
    let token = format!("tok_{}", user.id);
    state
        .sessions
        .write()
        .expect("sessions lock poisoned")
        .insert(token.clone(), user.clone());
    AuthData { user, token }
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Response> {
    validate_username(&credentials.username)?;
    validate_password(&credentials.password)?;
    let auth = mint_session(&state, &credentials.username);
    info!("用户登录: {}", auth.user.username);
    Ok(response::ok(auth))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Response> {
    validate_username(&credentials.username)?;
    validate_password(&credentials.password)?;
    let auth = mint_session(&state, &credentials.username);
    info!("用户注册: {}", auth.user.username);
    Ok(response::created(auth))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    // 幂等：token 无效也返回成功
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        state
            .sessions
            .write()
            .expect("sessions lock poisoned")
            .remove(token);
    }
    Ok(response::ok(serde_json::json!({})))
}
