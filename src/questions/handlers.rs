//! 题目 API HTTP 处理器

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{
    error::QuestionError,
    model::{NewQuestion, QuestionUpdate},
    router::QuestionsState,
    types::PageQuery,
};
use crate::auth::Claims;
use crate::common::types::{SuccessResponse, rejection_response};

fn error_response(e: QuestionError) -> Response {
    if let QuestionError::Internal(ref inner) = e {
        tracing::error!("题目存储操作失败: {:#}", inner);
    }
    (e.status_code(), Json(e.to_error_response())).into_response()
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, Response> {
    path.map(|Path(id)| id)
        .map_err(|r| rejection_response(r.status(), r.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(payload)| payload)
        .map_err(|r| rejection_response(r.status(), r.body_text()))
}

/// GET /questions
/// GET /questions?page=N
/// 返回全部题目，或第 N 页（每页 20 条）
pub async fn find_all(
    State(state): State<QuestionsState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(r) => return rejection_response(r.status(), r.body_text()),
    };
    let result = match query.page {
        Some(page) => state.service.get_questions_by_page(page).await,
        None => state.service.find_all().await,
    };
    match result {
        Ok(questions) => Json(questions).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /questions/:id
/// 不存在时返回 `null`
pub async fn find_one(
    State(state): State<QuestionsState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match path_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.service.find_one(id).await {
        Ok(question) => Json(question).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /questions
pub async fn create(
    State(state): State<QuestionsState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Response {
    let payload = match json_body(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    match state.service.create(payload).await {
        Ok(question) => {
            tracing::info!("管理员 {} 创建题目 #{}", claims.username, question.id);
            (StatusCode::CREATED, Json(question)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// PUT /questions/:id
pub async fn update(
    State(state): State<QuestionsState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<QuestionUpdate>, JsonRejection>,
) -> Response {
    let (id, payload) = match (path_id(path), json_body(body)) {
        (Ok(id), Ok(payload)) => (id, payload),
        (Err(response), _) | (_, Err(response)) => return response,
    };
    match state.service.update(id, payload).await {
        Ok(question) => {
            tracing::info!("管理员 {} 更新题目 #{}", claims.username, id);
            Json(question).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /questions/:id
pub async fn remove(
    State(state): State<QuestionsState>,
    Extension(claims): Extension<Claims>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match path_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.service.remove(id).await {
        Ok(()) => {
            tracing::info!("管理员 {} 删除题目 #{}", claims.username, id);
            Json(SuccessResponse::ok()).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /questions/vote-vrai/:id
pub async fn vote_vrai(
    State(state): State<QuestionsState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match path_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.service.vote_vrai(id).await {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /questions/vote-faux/:id
pub async fn vote_faux(
    State(state): State<QuestionsState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match path_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.service.vote_faux(id).await {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(e) => error_response(e),
    }
}
