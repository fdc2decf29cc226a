//! HTTP 服务端到端测试
//!
//! 在随机端口起一个真实的 axum 服务，用 real 模式客户端打完整链路。

use std::sync::Arc;

use stack_underflow::models::{NewQuestion, QuestionUpdate};
use stack_underflow::server::{app_router, AppState};
use stack_underflow::{ApiClient, Config, ErrorCode, MemoryStore, QuestionStatus, RealApi};
use tokio::net::TcpListener;

/// 起一个测试服务，返回指向它的 real 客户端配置
async fn spawn_server(store: Arc<MemoryStore>) -> Config {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定随机端口应该成功");
    let addr = listener.local_addr().expect("获取地址应该成功");
    let router = app_router(AppState::new(store));
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("测试服务异常退出");
    });
    Config {
        api_base_url: format!("http://{addr}/api/v1"),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let config = spawn_server(Arc::new(MemoryStore::new())).await;
    let api = RealApi::new(&config);

    let user = api.login("zhangsan", "secret").await.expect("登录应该成功");
    assert!(user.id.starts_with("user_"));
    assert_eq!(api.current_user().await.expect("应有会话").username, "zhangsan");

    let question = api
        .create_question(NewQuestion {
            title: "How do I center a div?".to_string(),
            description: "I have tried margin auto but it does not work.".to_string(),
        })
        .await
        .expect("创建问题应该成功");
    assert_eq!(question.status, QuestionStatus::Open);

    let fetched = api
        .fetch_question(&question.id)
        .await
        .expect("按 id 获取应该成功");
    assert_eq!(fetched.title, question.title);

    let comment = api
        .add_comment(&question.id, "Try flexbox with justify-content.")
        .await
        .expect("评论应该成功");
    let fetched = api
        .fetch_question(&question.id)
        .await
        .expect("按 id 获取应该成功");
    assert_eq!(fetched.comments.len(), 1);
    assert_eq!(fetched.comments[0].id, comment.id);

    let updated = api
        .update_question(
            &question.id,
            QuestionUpdate {
                title: None,
                description: None,
                status: Some(QuestionStatus::Answered),
            },
        )
        .await
        .expect("更新应该成功");
    assert_eq!(updated.status, QuestionStatus::Answered);

    api.delete_comment(&question.id, &comment.id)
        .await
        .expect("删除评论应该成功");
    api.delete_question(&question.id)
        .await
        .expect("删除问题应该成功");

    let err = api.fetch_question(&question.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuestionNotFound);
}

#[tokio::test]
async fn test_http_ownership_enforced() {
    let config = spawn_server(Arc::new(MemoryStore::new())).await;
    let owner = RealApi::new(&config);
    let intruder = RealApi::new(&config);

    owner.login("owner", "pw").await.expect("登录应该成功");
    let question = owner
        .create_question(NewQuestion {
            title: "Question owned by someone else".to_string(),
            description: "Only the owner may modify this question.".to_string(),
        })
        .await
        .expect("创建问题应该成功");

    intruder.login("intruder", "pw").await.expect("登录应该成功");
    let err = intruder.delete_question(&question.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized, "非所有者应收到 403");

    // 未登录客户端应收到 401/403 路径的错误
    let anonymous = RealApi::new(&config);
    let err = anonymous
        .create_question(NewQuestion {
            title: "Anonymous question title".to_string(),
            description: "Anonymous users must not create questions.".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn test_http_read_endpoints_with_seed() {
    let config = spawn_server(Arc::new(MemoryStore::with_seed_data())).await;
    let api = RealApi::new(&config);

    let questions = api.fetch_questions().await.expect("列表应该成功");
    assert!(!questions.is_empty(), "种子数据不应为空");
    for pair in questions.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "列表应按创建时间降序"
        );
    }

    let results = api.search_questions("git").await.expect("搜索应该成功");
    assert!(
        results
            .iter()
            .all(|q| q.title.to_lowercase().contains("git")
                || q.description.to_lowercase().contains("git")),
        "搜索结果应包含关键词"
    );

    let source = &questions[0];
    let related = api
        .related_questions(&source.id, 3)
        .await
        .expect("相关问题应该成功");
    assert!(related.len() <= 3);
    assert!(related.iter().all(|q| q.id != source.id));

    let hot = api.hot_questions(2).await.expect("热门问题应该成功");
    assert!(hot.len() <= 2);

    let err = api.fetch_question("missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuestionNotFound, "不存在的问题应 404");
}

#[tokio::test]
async fn test_http_validation_message_passthrough() {
    let config = spawn_server(Arc::new(MemoryStore::new())).await;
    let api = RealApi::new(&config);

    api.login("lisi", "pw").await.expect("登录应该成功");
    let err = api
        .create_question(NewQuestion {
            title: "ab".to_string(),
            description: "A long enough question description.".to_string(),
        })
        .await
        .unwrap_err();
    // 信封只携带文案，real 客户端按状态码还原 code
    assert_eq!(err.message, "Title must be at least 5 characters");
}

#[tokio::test]
async fn test_http_logout_invalidates_token() {
    let config = spawn_server(Arc::new(MemoryStore::new())).await;
    let api = RealApi::new(&config);

    api.login("wangwu", "pw").await.expect("登录应该成功");
    api.logout().await.expect("登出应该成功");
    assert!(api.current_user().await.is_none(), "登出后本地会话应清空");

    let err = api
        .create_question(NewQuestion {
            title: "A question after logout".to_string(),
            description: "This request carries no valid token.".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized, "登出后 token 应失效");
}
