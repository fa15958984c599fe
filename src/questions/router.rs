//! 题目 API 路由

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{create, find_all, find_one, remove, update, vote_faux, vote_vrai};
use super::service::QuestionService;
use crate::auth::{JwtManager, jwt_auth_middleware};

/// 题目 API 状态
#[derive(Clone)]
pub struct QuestionsState {
    pub service: Arc<QuestionService>,
}

/// 创建题目路由
///
/// # 端点
/// - `GET /questions` - 全部题目；带 `?page=N` 时返回第 N 页
/// - `GET /questions/{id}` - 单个题目（不存在时为 `null`）
/// - `POST /questions` - 创建题目（需认证）
/// - `PUT /questions/{id}` - 更新题目（需认证）
/// - `DELETE /questions/{id}` - 删除题目（需认证）
/// - `POST /questions/vote-vrai/{id}` - 投"真"
/// - `POST /questions/vote-faux/{id}` - 投"假"
pub fn create_questions_router(service: Arc<QuestionService>, jwt: Arc<JwtManager>) -> Router {
    let state = QuestionsState { service };

    let protected: Router<QuestionsState> = Router::new()
        .route("/questions", post(create))
        .route("/questions/{id}", put(update).delete(remove))
        .route_layer(middleware::from_fn_with_state(jwt, jwt_auth_middleware));

    Router::new()
        .route("/questions", get(find_all))
        .route("/questions/{id}", get(find_one))
        .route("/questions/vote-vrai/{id}", post(vote_vrai))
        .route("/questions/vote-faux/{id}", post(vote_faux))
        .merge(protected)
        .with_state(state)
}
