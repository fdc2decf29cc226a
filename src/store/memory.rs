//! 内存仓库实现
//!
//! 单个 `RwLock<Vec<Question>>` 就是全部"数据库"，
//! 进程结束数据即消失；并发语义是同一集合上的 last-write-wins。

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::models::{Comment, Question, QuestionStatus, QuestionUpdate, User};
use crate::services::relevance;
use crate::store::Store;

/// 内存仓库
pub struct MemoryStore {
    questions: RwLock<Vec<Question>>,
    /// 上一次发放的毫秒时间戳，保证同一毫秒内的 id 依然递增
    last_stamp: AtomicI64,
}

impl MemoryStore {
    /// 创建空仓库
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(Vec::new()),
            last_stamp: AtomicI64::new(0),
        }
    }

    /// 创建预置演示数据的仓库
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        store.seed();
        store
    }

    /// 当前问题数量
    pub fn question_count(&self) -> usize {
        self.questions.read().expect("store lock poisoned").len()
    }

    /// 发放时间戳派生的 id 基数
    ///
    /// 同一毫秒内多次创建时在上一值基础上 +1，避免 id 冲突。
    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(last.max(now - 1) + 1)
            })
            .unwrap_or(now);
        prev.max(now - 1) + 1
    }

    fn seed(&self) {
        let now = Utc::now();
        let days = |n: i64| now - Duration::days(n);

        let seed_comment = |id: &str, question_id: &str, user_id: &str, username: &str, content: &str, days_ago: i64| Comment {
            id: id.to_string(),
            question_id: question_id.to_string(),
            user_id: user_id.to_string(),
            username: username.to_string(),
            content: content.to_string(),
            created_at: days(days_ago),
        };

        let seed_question = |id: &str, title: &str, description: &str, status: QuestionStatus, user_id: &str, username: &str, days_ago: i64, comments: Vec<Comment>| Question {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            user_id: user_id.to_string(),
            username: username.to_string(),
            created_at: days(days_ago),
            comments,
        };

        let questions = vec![
            seed_question(
                "q1",
                "How do I center a div in CSS?",
                "I've tried using margin: auto but it's not working. What's the best way to center a div both horizontally and vertically?",
                QuestionStatus::Answered,
                "user1",
                "dev_master",
                2,
                vec![
                    seed_comment("c1", "q1", "user2", "css_ninja", "You can use flexbox: display: flex; justify-content: center; align-items: center;", 2),
                    seed_comment("c2", "q1", "user3", "web_wizard", "Or use grid: display: grid; place-items: center;", 1),
                ],
            ),
            seed_question(
                "q2",
                "What's the difference between let and const in JavaScript?",
                "I'm new to JavaScript and I'm confused about when to use let vs const. Can someone explain the difference?",
                QuestionStatus::Open,
                "user2",
                "js_learner",
                1,
                Vec::new(),
            ),
            seed_question(
                "q3",
                "React useEffect dependency array explained",
                "Can someone explain how the dependency array in useEffect works? When should I include variables in it?",
                QuestionStatus::Open,
                "user3",
                "react_fan",
                0,
                vec![seed_comment("c3", "q3", "user1", "dev_master", "The dependency array tells React when to re-run the effect. Include any variables that the effect uses.", 0)],
            ),
            seed_question(
                "q4",
                "How to handle async/await errors properly?",
                "I'm using async/await but not sure about the best way to handle errors. Should I use try/catch everywhere?",
                QuestionStatus::Closed,
                "user4",
                "async_expert",
                2,
                vec![seed_comment("c4", "q4", "user1", "dev_master", "Yes, try/catch is the standard way. You can also use .catch() with promises.", 2)],
            ),
            seed_question(
                "q5",
                "Python list comprehension vs map function",
                "Which is more Pythonic - list comprehension or map function? What are the performance differences?",
                QuestionStatus::Answered,
                "user5",
                "pythonista",
                3,
                vec![seed_comment("c5", "q5", "user6", "code_guru", "List comprehensions are generally more readable and Pythonic. Map can be faster for simple operations.", 3)],
            ),
            seed_question(
                "q6",
                "Understanding Git rebase vs merge",
                "When should I use git rebase instead of git merge? What are the pros and cons of each?",
                QuestionStatus::Open,
                "user7",
                "git_novice",
                4,
                Vec::new(),
            ),
            seed_question(
                "q7",
                "How to optimize database queries in PostgreSQL?",
                "My queries are running slow. What are some best practices for optimizing PostgreSQL queries?",
                QuestionStatus::Answered,
                "user8",
                "db_admin",
                5,
                vec![seed_comment("c6", "q7", "user9", "sql_expert", "Use EXPLAIN ANALYZE to analyze query plans, create appropriate indexes, and avoid SELECT *.", 5)],
            ),
            seed_question(
                "q8",
                "TypeScript interface vs type alias",
                "What's the difference between interface and type in TypeScript? When should I use each?",
                QuestionStatus::Open,
                "user10",
                "ts_dev",
                6,
                Vec::new(),
            ),
        ];

        let count = questions.len();
        *self.questions.write().expect("store lock poisoned") = questions;
        debug!("内存仓库已预置 {} 条演示问题", count);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn all_questions(&self) -> Vec<Question> {
        let mut questions = self.questions.read().expect("store lock poisoned").clone();
        // 读取时排序（不在写入时维护顺序）
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        questions
    }

    fn question_by_id(&self, id: &str) -> Option<Question> {
        self.questions
            .read()
            .expect("store lock poisoned")
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    fn create_question(&self, title: &str, description: &str, author: &User) -> Question {
        let question = Question {
            id: format!("q_{}", self.next_stamp()),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            status: QuestionStatus::Open,
            user_id: author.id.clone(),
            username: author.username.clone(),
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        // 追加到尾部：集合保持创建顺序，列表的最新在前由读取时排序产生
        self.questions
            .write()
            .expect("store lock poisoned")
            .push(question.clone());
        debug!("创建问题: {}", question.id);
        question
    }

    fn update_question(&self, id: &str, update: &QuestionUpdate) -> Option<Question> {
        let mut questions = self.questions.write().expect("store lock poisoned");
        let question = questions.iter_mut().find(|q| q.id == id)?;
        if let Some(title) = &update.title {
            question.title = title.trim().to_string();
        }
        if let Some(description) = &update.description {
            question.description = description.trim().to_string();
        }
        if let Some(status) = update.status {
            question.status = status;
        }
        Some(question.clone())
    }

    fn delete_question(&self, id: &str) -> bool {
        let mut questions = self.questions.write().expect("store lock poisoned");
        let before = questions.len();
        questions.retain(|q| q.id != id);
        questions.len() < before
    }

    fn search_questions(&self, query: &str) -> Vec<Question> {
        let needle = query.to_lowercase();
        self.all_questions()
            .into_iter()
            .filter(|q| {
                q.title.to_lowercase().contains(&needle)
                    || q.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn related_questions(&self, id: &str, limit: usize) -> Vec<Question> {
        let Some(source) = self.question_by_id(id) else {
            return Vec::new();
        };
        // 候选按插入顺序参与打分，平分时保持该顺序
        let candidates = self.questions.read().expect("store lock poisoned").clone();
        relevance::related_questions(&source, &candidates, limit)
    }

    fn hot_questions(&self, limit: usize) -> Vec<Question> {
        let questions = self.questions.read().expect("store lock poisoned").clone();
        relevance::hot_questions(&questions, limit)
    }

    fn question_owner(&self, id: &str) -> Option<String> {
        self.question_by_id(id).map(|q| q.user_id)
    }

    fn add_comment(&self, question_id: &str, content: &str, author: &User) -> Option<Comment> {
        let mut questions = self.questions.write().expect("store lock poisoned");
        let question = questions.iter_mut().find(|q| q.id == question_id)?;
        let comment = Comment {
            id: format!("c_{}", self.next_stamp()),
            question_id: question_id.to_string(),
            user_id: author.id.clone(),
            username: author.username.clone(),
            content: content.trim().to_string(),
            created_at: Utc::now(),
        };
        question.comments.push(comment.clone());
        Some(comment)
    }

    fn update_comment(
        &self,
        question_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Option<Comment> {
        let mut questions = self.questions.write().expect("store lock poisoned");
        let question = questions.iter_mut().find(|q| q.id == question_id)?;
        let comment = question.comments.iter_mut().find(|c| c.id == comment_id)?;
        comment.content = content.trim().to_string();
        Some(comment.clone())
    }

    fn delete_comment(&self, question_id: &str, comment_id: &str) -> bool {
        let mut questions = self.questions.write().expect("store lock poisoned");
        let Some(question) = questions.iter_mut().find(|q| q.id == question_id) else {
            return false;
        };
        let before = question.comments.len();
        question.comments.retain(|c| c.id != comment_id);
        question.comments.len() < before
    }

    fn comment_owner(&self, comment_id: &str) -> Option<String> {
        self.questions
            .read()
            .expect("store lock poisoned")
            .iter()
            .flat_map(|q| q.comments.iter())
            .find(|c| c.id == comment_id)
            .map(|c| c.user_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "user_test".to_string(),
            username: "tester".to_string(),
        }
    }

    #[test]
    fn test_create_then_fetch_round_trip() {
        let store = MemoryStore::new();
        let created = store.create_question(
            "How do I center a div?",
            "Tried margin:auto, didn't work, need help",
            &test_user(),
        );

        let fetched = store.question_by_id(&created.id).unwrap();
        assert_eq!(fetched.title, created.title);
        assert_eq!(fetched.description, created.description);
        assert_eq!(fetched.status, QuestionStatus::Open);
        assert_eq!(fetched.user_id, "user_test");
        assert!(fetched.comments.is_empty());
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let store = MemoryStore::new();
        let user = test_user();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let q = store.create_question("A valid title", "A valid description here", &user);
            assert!(ids.insert(q.id), "id 不应重复");
        }
    }

    #[test]
    fn test_all_questions_newest_first() {
        let store = MemoryStore::with_seed_data();
        let questions = store.all_questions();
        for window in questions.windows(2) {
            assert!(window[0].created_at >= window[1].created_at);
        }
    }

    #[test]
    fn test_partial_update() {
        let store = MemoryStore::new();
        let q = store.create_question("Original title", "Original description", &test_user());

        let update = QuestionUpdate {
            status: Some(QuestionStatus::Closed),
            ..Default::default()
        };
        let updated = store.update_question(&q.id, &update).unwrap();
        assert_eq!(updated.status, QuestionStatus::Closed);
        assert_eq!(updated.title, "Original title");

        assert!(store.update_question("missing", &update).is_none());
    }

    #[test]
    fn test_delete_question() {
        let store = MemoryStore::new();
        let q = store.create_question("A valid title", "A valid description", &test_user());
        assert!(store.delete_question(&q.id));
        assert!(!store.delete_question(&q.id));
        assert!(store.question_by_id(&q.id).is_none());
    }

    #[test]
    fn test_search_case_insensitive() {
        let store = MemoryStore::with_seed_data();
        let results = store.search_questions("POSTGRESQL");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "q7");

        // 命中描述也算
        let results = store.search_questions("pythonic");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "q5");
    }

    #[test]
    fn test_comment_lifecycle() {
        let store = MemoryStore::new();
        let author = test_user();
        let other = User {
            id: "user_other".to_string(),
            username: "other".to_string(),
        };
        let q = store.create_question("A valid title", "A valid description", &author);

        let comment = store.add_comment(&q.id, "use flexbox!!", &other).unwrap();
        assert_eq!(comment.question_id, q.id);
        assert_eq!(store.question_by_id(&q.id).unwrap().comments.len(), 1);
        assert_eq!(store.comment_owner(&comment.id).unwrap(), "user_other");

        let updated = store
            .update_comment(&q.id, &comment.id, "use grid instead")
            .unwrap();
        assert_eq!(updated.content, "use grid instead");

        assert!(store.delete_comment(&q.id, &comment.id));
        assert!(store.question_by_id(&q.id).unwrap().comments.is_empty());
        assert!(store.comment_owner(&comment.id).is_none());
    }

    #[test]
    fn test_add_comment_missing_question() {
        let store = MemoryStore::new();
        assert!(store.add_comment("missing", "content", &test_user()).is_none());
    }

    #[test]
    fn test_related_tie_order_follows_creation() {
        let store = MemoryStore::new();
        let user = test_user();
        let source = store.create_question(
            "docker networking basics",
            "how bridge networks work in detail",
            &user,
        );
        // 两个候选得分相同（各命中标题中的 "docker" 一次）
        let first = store.create_question(
            "docker volumes explained",
            "persisting container data on disk",
            &user,
        );
        let second = store.create_question(
            "docker compose tips",
            "running multi container setups locally",
            &user,
        );

        let related = store.related_questions(&source.id, 5);
        let ids: Vec<&str> = related.iter().map(|q| q.id.as_str()).collect();
        // 平分时按创建顺序返回，先创建的在前
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[test]
    fn test_hot_uses_comment_count_from_seed() {
        let store = MemoryStore::with_seed_data();
        let hot = store.hot_questions(3);
        // q1 有 2 条评论，稳居第一
        assert_eq!(hot[0].id, "q1");
        assert!(hot.iter().all(|q| !q.comments.is_empty()));
    }
}
