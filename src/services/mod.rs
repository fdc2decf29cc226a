//! 业务能力层
//!
//! 纯函数服务，不持有状态：
//! - `validation` - 字段校验能力
//! - `relevance` - 相关问题/热门问题排序能力

pub mod relevance;
pub mod validation;
