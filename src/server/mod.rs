//! HTTP 服务层
//!
//! 基于 axum 的 `/api/v1` 后端，real 模式客户端的对端。
//! 职责：
//! - 路由编排与请求日志
//! - Bearer token 会话（进程内，不持久化）
//! - 把仓库/校验结果装入统一响应信封

pub mod handlers;
pub mod response;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::models::User;
use crate::store::MemoryStore;

/// 会话表：token -> 用户
pub type Sessions = Arc<RwLock<HashMap<String, User>>>;

/// 服务共享状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub sessions: Sessions,
}

impl AppState {
    /// 以给定仓库创建状态
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// 组装完整路由
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/questions",
            get(handlers::questions::list).post(handlers::questions::create),
        )
        .route("/questions/search", get(handlers::questions::search))
        .route("/questions/hot", get(handlers::questions::hot))
        .route(
            "/questions/:id",
            get(handlers::questions::detail)
                .put(handlers::questions::update)
                .delete(handlers::questions::delete),
        )
        .route("/questions/:id/related", get(handlers::questions::related))
        .route(
            "/questions/:id/comments",
            post(handlers::comments::create),
        )
        .route(
            "/questions/:id/comments/:comment_id",
            put(handlers::comments::update).delete(handlers::comments::delete),
        );

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 请求日志中间件
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!("{} {} -> {}", method, path, response.status());
    response
}
