//! 评论模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 评论实体，归属于某个问题
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub question_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 创建/更新评论的请求载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub content: String,
}
