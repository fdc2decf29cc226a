//! 问题模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::comment::Comment;

/// 问题状态
///
/// 状态流转由调用方驱动，不做状态机约束：
/// 所有者可以随时把状态设为任意值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Open,
    Answered,
    Closed,
}

/// 问题实体
///
/// 评论内聚在问题之内（不是独立聚合根），
/// 不变式：`comments[i].question_id == id`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: QuestionStatus,
    pub user_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// 创建问题的请求载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
}

/// 更新问题的请求载荷（部分更新，缺省字段不变）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuestionStatus>,
}
