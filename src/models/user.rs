//! 用户模型
//!
//! 登录/注册为演示用桩实现：任意非空凭证均可通过，
//! id 由时间戳派生，不做密码哈希（明确不是生产级认证）。

use serde::{Deserialize, Serialize};

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// 登录/注册凭证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 登录/注册响应载荷
///
/// token 是不透明的演示令牌（非 JWT），后续请求以 Bearer 方式携带。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
}
