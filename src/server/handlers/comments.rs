//! 评论端点

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;

use crate::error::{ApiResult, ErrorCode};
use crate::models::CommentPayload;
use crate::server::handlers::{bearer_user, require_owner};
use crate::server::{response, AppState};
use crate::services::validation::validate_comment;
use crate::store::Store;

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(question_id): Path<String>,
    Json(payload): Json<CommentPayload>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    validate_comment(&payload.content)?;
    let comment = state
        .store
        .add_comment(&question_id, &payload.content, &user)
        .ok_or(ErrorCode::QuestionNotFound)?;
    Ok(response::created(comment))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((question_id, comment_id)): Path<(String, String)>,
    Json(payload): Json<CommentPayload>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    // 所有权优先于载荷校验
    require_owner(
        &user,
        state.store.comment_owner(&comment_id),
        ErrorCode::CommentNotFound,
    )?;
    validate_comment(&payload.content)?;
    let comment = state
        .store
        .update_comment(&question_id, &comment_id, &payload.content)
        .ok_or(ErrorCode::CommentNotFound)?;
    Ok(response::ok(comment))
}

pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((question_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let user = bearer_user(&state, &headers)?;
    require_owner(
        &user,
        state.store.comment_owner(&comment_id),
        ErrorCode::CommentNotFound,
    )?;
    if !state.store.delete_comment(&question_id, &comment_id) {
        return Err(ErrorCode::CommentNotFound.into());
    }
    Ok(response::ok(serde_json::json!({})))
}
