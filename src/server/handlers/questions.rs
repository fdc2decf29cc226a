//! 问题端点

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiResult, ErrorCode};
use crate::models::{NewQuestion, QuestionUpdate};
use crate::server::handlers::{bearer_user, require_owner};
use crate::server::{response, AppState};
use crate::services::validation::{validate_description, validate_title};
use crate::store::{paginate, Store};

/// 相关/热门问题的默认条数
const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Response> {
    let questions = state.store.all_questions();
    // 不带分页参数时返回全量，与无分页的旧行为兼容
    let questions = match (params.page, params.per_page) {
        (None, None) => questions,
        (page, per_page) => paginate(
            &questions,
            page.unwrap_or(1),
            per_page.unwrap_or(DEFAULT_LIMIT * 4),
        ),
    };
    Ok(response::ok(questions))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let question = state
        .store
        .question_by_id(&id)
        .ok_or(ErrorCode::QuestionNotFound)?;
    Ok(response::ok(question))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<NewQuestion>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    let question = state
        .store
        .create_question(&input.title, &input.description, &user);
    info!("创建问题: {} ({})", question.title, question.id);
    Ok(response::created(question))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<QuestionUpdate>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    // 所有权优先于载荷校验
    require_owner(
        &user,
        state.store.question_owner(&id),
        ErrorCode::QuestionNotFound,
    )?;
    if let Some(title) = &update.title {
        validate_title(title)?;
    }
    if let Some(description) = &update.description {
        validate_description(description)?;
    }
    let question = state
        .store
        .update_question(&id, &update)
        .ok_or(ErrorCode::QuestionNotFound)?;
    Ok(response::ok(question))
}

pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    require_owner(
        &user,
        state.store.question_owner(&id),
        ErrorCode::QuestionNotFound,
    )?;
    if !state.store.delete_question(&id) {
        return Err(ErrorCode::QuestionNotFound.into());
    }
    info!("删除问题: {}", id);
    Ok(response::ok(serde_json::json!({})))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Response> {
    Ok(response::ok(state.store.search_questions(&params.q)))
}

pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Response> {
    // 源问题不存在时返回 404，而不是空列表
    if state.store.question_by_id(&id).is_none() {
        return Err(ErrorCode::QuestionNotFound.into());
    }
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(response::ok(state.store.related_questions(&id, limit)))
}

pub async fn hot(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Response> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(response::ok(state.store.hot_questions(limit)))
}
