use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{dtos::ServiceResponse, models::User, repository::Lookup, AppState};

pub fn users_handler() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

// -- 占位列表，不访问仓储
pub async fn list_users() -> Json<Vec<&'static str>> {
    Json(vec!["value1", "value2"])
}

/// 按 id 查询用户
///
/// # 返回
/// - `200` -- 命中，`data` 为用户
/// - `404` -- 未命中，`failed=true`，记录一条 info 日志
/// - `500` -- 仓储出错，`failed=true` 且带错误详情，记录一条 error 日志
pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<i32>,
) -> (StatusCode, Json<ServiceResponse<User>>) {
    match app_state.repository.fetch(id).await {
        Lookup::Found(user) => (StatusCode::OK, Json(ServiceResponse::success(user))),
        Lookup::NotFound => {
            tracing::info!(id, "Not found.");
            (StatusCode::NOT_FOUND, Json(ServiceResponse::not_found()))
        }
        Lookup::Failed(err) => {
            tracing::error!(id, error = %err, "Server error.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServiceResponse::error(&err)),
            )
        }
    }
}

/// 创建用户文档
///
/// 任何仓储错误（包括文档已存在）都返回 `409`，此路径不记录日志。
pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<User>,
) -> (StatusCode, Json<ServiceResponse<User>>) {
    match app_state.repository.insert(&body).await {
        Ok(()) => (StatusCode::CREATED, Json(ServiceResponse::default())),
        Err(err) => (StatusCode::CONFLICT, Json(ServiceResponse::error(&err))),
    }
}

// -- 更新与删除尚未实现，只保留路由
pub async fn update_user(Path(_id): Path<i32>, _value: String) -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn delete_user(Path(_id): Path<i32>) -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
