//! 数据仓库层
//!
//! 显式的仓库接口（不再用全局可变数组当"数据库"）：
//! `Store` 描述问题/评论的增删改查能力，
//! `MemoryStore` 是唯一的内存实现，也充当测试夹具。
//!
//! 约定：
//! - 未找到返回 `None`，由上层翻译为"未找到"错误
//! - 所有操作都是同步的全表扫描，O(n)，只在种子数据规模下成立

pub mod memory;

pub use memory::MemoryStore;

use crate::models::{Comment, Question, QuestionUpdate, User};

/// 仓库接口
pub trait Store: Send + Sync {
    /// 所有问题，按创建时间降序（最新在前）
    fn all_questions(&self) -> Vec<Question>;

    /// 按 id 查找问题
    fn question_by_id(&self, id: &str) -> Option<Question>;

    /// 创建问题，状态固定为 open，评论为空
    fn create_question(&self, title: &str, description: &str, author: &User) -> Question;

    /// 部分更新问题，缺省字段不变
    fn update_question(&self, id: &str, update: &QuestionUpdate) -> Option<Question>;

    /// 删除问题，返回是否存在
    fn delete_question(&self, id: &str) -> bool;

    /// 标题+描述的大小写不敏感子串搜索
    fn search_questions(&self, query: &str) -> Vec<Question>;

    /// 关键词重叠打分的相关问题，不含源问题
    fn related_questions(&self, id: &str, limit: usize) -> Vec<Question>;

    /// 按评论数、再按创建时间降序的热门问题
    fn hot_questions(&self, limit: usize) -> Vec<Question>;

    /// 问题所有者的 user_id
    fn question_owner(&self, id: &str) -> Option<String>;

    /// 给问题追加评论；问题不存在时返回 None
    fn add_comment(&self, question_id: &str, content: &str, author: &User) -> Option<Comment>;

    /// 更新评论内容
    fn update_comment(&self, question_id: &str, comment_id: &str, content: &str)
        -> Option<Comment>;

    /// 删除评论，返回是否存在
    fn delete_comment(&self, question_id: &str, comment_id: &str) -> bool;

    /// 评论所有者的 user_id（跨所有问题查找）
    fn comment_owner(&self, comment_id: &str) -> Option<String>;
}

/// 切片算术分页：page 从 1 开始
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    if per_page == 0 {
        return Vec::new();
    }
    let start = page.saturating_sub(1).saturating_mul(per_page);
    items.iter().skip(start).take(per_page).cloned().collect()
}
