//! 数据模型层
//!
//! 定义问答平台的核心实体与请求载荷，
//! 线上 JSON 形式与各前端实现保持一致（camelCase）。

pub mod comment;
pub mod question;
pub mod user;

pub use comment::{Comment, CommentPayload};
pub use question::{NewQuestion, Question, QuestionStatus, QuestionUpdate};
pub use user::{AuthData, Credentials, User};
