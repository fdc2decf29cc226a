//! 相关问题打分
//!
//! 朴素的关键词重叠启发式，不是搜索索引，只适用于种子数据规模：
//! - 源问题标题按空白切词，丢弃长度 ≤ 3 的词
//! - 词出现在候选标题 +2 分，出现在候选描述 +1 分
//! - 按分数降序，平分保持候选原有顺序（稳定排序）

use crate::models::Question;

/// 计算单个候选问题的相关度分数
fn score(words: &[String], candidate: &Question) -> i32 {
    let title = candidate.title.to_lowercase();
    let description = candidate.description.to_lowercase();
    let mut total = 0;
    for word in words {
        if title.contains(word.as_str()) {
            total += 2;
        }
        if description.contains(word.as_str()) {
            total += 1;
        }
    }
    total
}

/// 返回与源问题最相关的至多 `limit` 个问题
///
/// 结果不包含源问题本身；0 分的候选被过滤掉。
pub fn related_questions(source: &Question, candidates: &[Question], limit: usize) -> Vec<Question> {
    let words: Vec<String> = source
        .title
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .map(str::to_string)
        .collect();

    let mut scored: Vec<(i32, &Question)> = candidates
        .iter()
        .filter(|candidate| candidate.id != source.id)
        .map(|candidate| (score(&words, candidate), candidate))
        .filter(|(total, _)| *total > 0)
        .collect();

    // sort_by 是稳定排序，平分时保持插入顺序
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// 返回至多 `limit` 个热门问题
///
/// 按评论数降序，评论数相同时按创建时间降序。
pub fn hot_questions(questions: &[Question], limit: usize) -> Vec<Question> {
    let mut sorted: Vec<&Question> = questions.iter().collect();
    sorted.sort_by(|a, b| {
        b.comments
            .len()
            .cmp(&a.comments.len())
            .then(b.created_at.cmp(&a.created_at))
    });
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, QuestionStatus};
    use chrono::{Duration, Utc};

    /// 创建测试用的问题
    fn make_question(id: &str, title: &str, description: &str) -> Question {
        Question {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: QuestionStatus::Open,
            user_id: "user1".to_string(),
            username: "dev_master".to_string(),
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }

    fn make_comment(id: &str, question_id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            question_id: question_id.to_string(),
            user_id: "user2".to_string(),
            username: "css_ninja".to_string(),
            content: "use flexbox!!".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_related_scores_title_double() {
        let source = make_question("q1", "docker networking basics", "irrelevant text here");
        // q2 标题命中 "docker"（+2），q3 仅描述命中（+1）
        let candidates = vec![
            source.clone(),
            make_question("q3", "unrelated title", "docker is mentioned in this description"),
            make_question("q2", "docker volumes explained", "how volumes persist data"),
        ];

        let related = related_questions(&source, &candidates, 5);
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].id, "q2");
        assert_eq!(related[1].id, "q3");
    }

    #[test]
    fn test_related_discards_short_words() {
        // "how"、"do"、"div" 都不超过 3 个字符，只有 "center" 参与打分
        let source = make_question("q1", "how do I center a div", "css question");
        let candidates = vec![
            make_question("q2", "center a div vertically", "margin auto does not work"),
            make_question("q3", "how to use git", "short words must not match this"),
        ];

        let related = related_questions(&source, &candidates, 5);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "q2");
    }

    #[test]
    fn test_related_never_returns_source_and_respects_limit() {
        let source = make_question("q1", "docker networking", "bridge mode");
        let candidates: Vec<Question> = (1..=6)
            .map(|i| {
                make_question(
                    &format!("q{i}"),
                    "docker question",
                    "more docker content here",
                )
            })
            .collect();

        let related = related_questions(&source, &candidates, 3);
        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|q| q.id != "q1"));
    }

    #[test]
    fn test_related_tie_break_is_insertion_order() {
        let source = make_question("q0", "docker networking", "irrelevant");
        let candidates = vec![
            make_question("q1", "docker one", "no extra match"),
            make_question("q2", "docker two", "no extra match"),
            make_question("q3", "docker three", "no extra match"),
        ];

        let related = related_questions(&source, &candidates, 5);
        let ids: Vec<&str> = related.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_hot_sorted_by_comments_then_recency() {
        let now = Utc::now();
        let mut q1 = make_question("q1", "one comment old", "description text");
        q1.created_at = now - Duration::days(3);
        q1.comments.push(make_comment("c1", "q1"));

        let mut q2 = make_question("q2", "two comments", "description text");
        q2.created_at = now - Duration::days(5);
        q2.comments.push(make_comment("c2", "q2"));
        q2.comments.push(make_comment("c3", "q2"));

        let mut q3 = make_question("q3", "one comment new", "description text");
        q3.created_at = now - Duration::days(1);
        q3.comments.push(make_comment("c4", "q3"));

        let hot = hot_questions(&[q1, q2, q3], 2);
        assert_eq!(hot.len(), 2);
        assert_eq!(hot[0].id, "q2");
        // 同为 1 条评论，较新的 q3 排在前面
        assert_eq!(hot[1].id, "q3");
    }
}
